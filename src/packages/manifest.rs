use quick_xml::{events::Event, Reader};

/// Reads the package name out of the contents of a `package.xml`.
///
/// Only the `<name>` directly under the root element counts, so names of
/// maintainers, authors & the like are ignored.
pub fn parse_package_name(contents: &str) -> Result<Option<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(contents);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut name: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                depth += 1;
                if depth == 2 && element.name().as_ref() == b"name" {
                    name = Some(String::new());
                }
            }
            Event::Text(text) if depth == 2 => {
                if let Some(name) = name.as_mut() {
                    name.push_str(&text.unescape()?);
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some(name) = name.take().filter(|name| !name.trim().is_empty()) {
                        return Ok(Some(name.trim().to_owned()));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}
