use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Cell, Row, Table};

use crate::grid::{Column, Voice, VoiceGrid};
use crate::shared::MAX_NAME;

// Rendering is a pure projection of the grid plus cursor; nothing in here
// mutates state.
pub fn render(frame: &mut Frame, area: Rect, grid: &VoiceGrid) {
    let header = Row::new(["name", "seed", "len", "dtx", "a", "d", "s", "r"])
        .style(Style::new().add_modifier(Modifier::BOLD));

    let rows = grid.voices.iter().enumerate().map(|(r, voice)| {
        let selected = |col: Column| r == grid.row && col == grid.col;
        let row = Row::new(voice_cells(voice, selected));
        if voice.name.is_empty() {
            row.style(Style::new().add_modifier(Modifier::DIM))
        } else {
            row
        }
    });

    let widths = [
        Constraint::Length(MAX_NAME as u16),
        Constraint::Length(6),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::bordered().title(" glitchgrid "));

    frame.render_widget(table, area);
}

fn voice_cells<'a>(voice: &Voice, selected: impl Fn(Column) -> bool) -> Vec<Cell<'a>> {
    let highlight = Style::new().add_modifier(Modifier::REVERSED);
    let texts = [
        (Column::Name, format!("{:<width$}", voice.name, width = MAX_NAME)),
        (Column::Seed, format!("{:06x}", voice.seed)),
        (Column::Len, format!("{:3}", voice.len)),
        (Column::Dtx, (if voice.dtx { " on" } else { "off" }).to_string()),
        (Column::TuneA, format!("{:x}", voice.tuning[0])),
        (Column::TuneD, format!("{:x}", voice.tuning[1])),
        (Column::TuneS, format!("{:x}", voice.tuning[2])),
        (Column::TuneR, format!("{:x}", voice.tuning[3])),
    ];

    texts
        .into_iter()
        .map(|(col, text)| {
            let cell = Cell::from(text);
            if selected(col) { cell.style(highlight) } else { cell }
        })
        .collect()
}
