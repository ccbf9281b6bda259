use crate::ring_buffer::RingBuffer;
use std::ascii;

const WRITE_MARK: char = 'w';
const READ_MARK: char = 'r';
const SHARED_MARK: char = '^';

/// Renders the store as a byte-string literal with the cursor positions
/// marked on the line below it.
///
/// ```text
/// b"1111000000\x00\x00\x00\x00\x00\x00"
///       w   r
/// ```
pub fn render(buf: &RingBuffer) -> String {
    let store = buf.as_bytes();
    let mut contents = String::from("b\"");
    let mut markers = String::from("  ");

    for (i, &byte) in store.iter().enumerate() {
        let escaped: String = ascii::escape_default(byte).map(char::from).collect();
        let mark = match (i == buf.write_cursor(), i == buf.read_cursor()) {
            (true, true) => SHARED_MARK,
            (true, false) => WRITE_MARK,
            (false, true) => READ_MARK,
            (false, false) => ' ',
        };
        markers.extend(std::iter::repeat(mark).take(escaped.len()));
        contents.push_str(&escaped);
    }
    contents.push('"');

    format!("{}\n{}", contents, markers.trim_end())
}
