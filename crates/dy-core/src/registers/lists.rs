/// `area.lst`: one area file name per line, `$` terminates.
pub fn parse_area_list(text: &str) -> Vec<String> {
    collect_names(text)
}

/// `hidden.lst`: same shape as the area index; names the areas whose
/// databases get `is_hidden = 1`.
pub fn parse_hidden_list(text: &str) -> Vec<String> {
    collect_names(text)
}

fn collect_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('$') {
            break;
        }
        names.push(line.to_string());
    }
    names
}
