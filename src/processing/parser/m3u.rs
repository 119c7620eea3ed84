use crate::model::{get_display_name, is_lead_line, ChannelBlock, PlaylistDocument};

/// Splits playlist text into the header lines and the channel blocks.
/// Every `#EXTINF` line starts a new block which takes all lines up to the next one.
pub fn parse_m3u<'a, I>(lines: I) -> PlaylistDocument
where
    I: Iterator<Item=&'a str>,
{
    let mut header = vec![];
    let mut blocks = vec![];
    let mut current: Option<ChannelBlock> = None;

    for line in lines {
        if is_lead_line(line) {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            current = Some(ChannelBlock::new(get_display_name(line), vec![line.to_string()]));
        } else if let Some(block) = current.as_mut() {
            block.lines.push(line.to_string());
        } else {
            header.push(line.to_string());
        }
    }
    if let Some(block) = current {
        blocks.push(block);
    }

    PlaylistDocument { header, blocks }
}

#[inline]
pub fn parse_m3u_text(text: &str) -> PlaylistDocument {
    parse_m3u(text.lines())
}
