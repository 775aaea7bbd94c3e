/// First `max_len` characters of `s`, with `...` appended only when something was cut.
pub fn preview(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}
