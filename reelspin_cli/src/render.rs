use reelspin_core::{Grid, LineWin, Symbol};

fn cell(symbol: Symbol, plain: bool) -> String {
    if plain {
        symbol.letter().to_string()
    } else {
        symbol.glyph().to_string()
    }
}

/// Row-major grid as text, one payline per row; paying rows are marked.
pub fn render_rows(rows: &Grid, wins: &[LineWin], plain: bool) -> String {
    let mut out = String::new();
    for (line, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|&s| cell(s, plain)).collect();
        out.push_str(&cells.join(" | "));
        if let Some(win) = wins.iter().find(|w| w.line == line) {
            out.push_str(&format!(
                "   <- line {} pays {}x",
                line + 1,
                win.symbol.value()
            ));
        }
        out.push('\n');
    }
    out
}
