use crate::ast::Position;

/// Renders the offending source line with a caret under `position`:
///
/// ```text
/// main(args: [[Int]]): Int = foo
///                            ^
/// (line 1, column 28) unknown identifier 'foo'
/// ```
pub fn render(source: &str, position: Position, message: &str) -> String {
    let line = source
        .lines()
        .nth(position.line.saturating_sub(1))
        .unwrap_or_default();
    let indent: String = line
        .chars()
        .take(position.column.saturating_sub(1))
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    format!("{}\n{}^\n({}) {}", line, indent, position, message)
}
