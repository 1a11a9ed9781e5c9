/// Role instruction sent as the system message of every paraphrase request.
pub const SYSTEM_PROMPT: &str = "You are an academic writing assistant that specializes in paraphrasing text while maintaining academic integrity. Just produce only the paraphrased text, no other text or notes.";

/// Markers the model tends to prefix unwanted commentary with. Checked in order.
const COMMENTARY_MARKERS: [&str; 2] = ["Note:", "Alternatively:"];

const INDENT: &str = "        ";

/// Build the user prompt for `text` at `academic_level`.
///
/// The template is fixed, continuation lines included, so identical inputs
/// always produce byte-identical prompts. `text` is embedded as given.
pub fn build_prompt(text: &str, academic_level: &str) -> String {
    let lines = [
        "Paraphrase the following academic text to maintain the same meaning but with different wording. ".to_string(),
        String::new(),
        "Guidelines:".to_string(),
        format!("- Make it sound natural and appropriate for {academic_level} level academic writing"),
        "- Avoid overly formal or verbose language".to_string(),
        "- Keep the paraphrased text concise and clear".to_string(),
        "- Don't add unnecessary explanations or notes".to_string(),
        "- Don't include placeholders like \"(Author's Last Name, Year)\" unless they're in the original text".to_string(),
        "- Focus on rewording while preserving the original meaning and tone".to_string(),
        "- Paraphrase only the texts that is being entered by the user.".to_string(),
        "- Do not produce additional notes and explanations.".to_string(),
        "- Just produce the paraphrased text paragraphs.".to_string(),
        String::new(),
        format!("Original text: {text}"),
        String::new(),
        "Paraphrased text:".to_string(),
    ];

    let mut prompt = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            prompt.push('\n');
            prompt.push_str(INDENT);
        }
        prompt.push_str(line);
    }
    prompt
}

/// Trim the completion and cut everything from the first "Note:" onwards,
/// then from the first "Alternatively:" in what remains.
pub fn strip_commentary(content: &str) -> String {
    let mut out = content.trim();
    for marker in COMMENTARY_MARKERS {
        if let Some(idx) = out.find(marker) {
            out = out[..idx].trim();
        }
    }
    out.to_string()
}
