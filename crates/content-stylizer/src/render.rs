use crate::error::StylizerError;
use crate::event::EventGroups;
use crate::output::MarkupOutput;

/// Walk event groups in position order, writing the text between them and
/// each event's markup.
pub fn render_events<O>(
    text: &str,
    groups: &EventGroups<'_, '_>,
    output: &mut O,
) -> Result<(), StylizerError>
where
    O: MarkupOutput,
    StylizerError: From<O::Error>,
{
    // Byte offset of every char boundary, so char positions slice in O(1).
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = boundaries.len() - 1;
    let byte_at = |pos: usize| boundaries[pos.min(char_count)];

    let mut cursor = 0;
    for (&position, events) in groups {
        if position > cursor {
            output.write_text(&text[byte_at(cursor)..byte_at(position)])?;
            cursor = position;
        }
        for event in events {
            output.write_markup(&event.markup()?)?;
        }
    }

    if cursor < char_count {
        output.write_text(&text[byte_at(cursor)..])?;
    }

    Ok(())
}
