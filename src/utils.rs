use crossterm::style::{Color, Stylize};
use std::hash::{Hash, Hasher};

/// Generate a color for a string based on hash.
pub fn get_color(s: &str) -> Color {
    let colors = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::AnsiValue(91), // Bright Red
        Color::AnsiValue(92), // Bright Green
        Color::AnsiValue(94), // Bright Blue
        Color::AnsiValue(93), // Bright Yellow
        Color::AnsiValue(95), // Bright Magenta
        Color::AnsiValue(96), // Bright Cyan
    ];
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    s.hash(&mut hasher);
    let hash = hasher.finish() as u32;
    colors[(hash % colors.len() as u32) as usize]
}

/// `[namespace/pod/container]` tag, colored per pod/container when `color` is set.
pub fn line_prefix(namespace: &str, pod: &str, container: &str, color: bool) -> String {
    let tag = format!("[{}/{}/{}]", namespace, pod, container);
    if color {
        let key = format!("{}/{}", pod, container);
        tag.with(get_color(&key)).to_string()
    } else {
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_color_is_stable() {
        assert_eq!(get_color("web-0/app"), get_color("web-0/app"));
    }

    #[test]
    fn test_line_prefix_plain() {
        assert_eq!(line_prefix("prod", "web-0", "app", false), "[prod/web-0/app]");
    }

    #[test]
    fn test_line_prefix_colored_keeps_tag() {
        let colored = line_prefix("prod", "web-0", "app", true);
        assert!(colored.contains("[prod/web-0/app]"));
    }
}
