use scraper::{Html, Node};

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "blockquote",
];

/// Flatten rich question text to plain lines.
///
/// Question bodies are authored as HTML. Block elements start a new line,
/// inline markup is dropped and whitespace inside a line is collapsed.
pub fn html_to_text(html: &str) -> String {
    let mut raw = String::with_capacity(html.len());
    if html.contains('<') {
        let fragment = Html::parse_fragment(html);
        for node in fragment.root_element().descendants() {
            match node.value() {
                Node::Text(text) => raw.push_str(text),
                Node::Element(el) if BLOCK_TAGS.contains(&el.name()) => raw.push('\n'),
                _ => {}
            }
        }
    } else {
        raw.push_str(html);
    }

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip trailing whitespace and squeeze runs of blank lines left behind by
/// template conditionals.
pub(crate) fn tidy(rendered: &str) -> String {
    let mut out = String::with_capacity(rendered.len());
    let mut blank_run = 0;
    for line in rendered.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 || out.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}
