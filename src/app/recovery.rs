#[must_use]
pub fn get_suggestions(msg: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("no such file") || msg_lower.contains("not found") {
        suggestions.push("Check the path; relative paths start at the launch directory".to_string());
    }

    if msg_lower.contains("permission denied") {
        suggestions.push("Try saving somewhere you can write to (Alt+S: save as)".to_string());
    }

    if msg_lower.contains("is a directory") {
        suggestions.push("Give a file name, not a directory".to_string());
    }

    if msg_lower.contains("not a supported image type") {
        suggestions.push("Supported images: png, jpg, jpeg, gif, webp, svg, bmp".to_string());
    }

    if msg_lower.contains("too large to embed") {
        suggestions.push("Shrink the image or link to it instead of embedding".to_string());
    }

    if msg_lower.contains("stream did not contain valid utf-8") {
        suggestions.push("Only UTF-8 text notes can be opened".to_string());
    }

    suggestions
}
