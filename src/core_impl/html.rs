//! A forgiving HTML reader for the pages the harness loads. It understands
//! elements, attributes, text, comments and doctype-style declarations, and
//! recovers from the usual sloppiness: unclosed `<li>`, `<option>` and `<p>`,
//! stray end tags, unquoted attribute values, duplicate attributes.

use super::*;

pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut reader = HtmlReader { src: html, pos: 0 };
    let mut builder = TreeBuilder::new();

    while let Some(token) = reader.next_token()? {
        match token {
            Token::Text(text) => builder.text(decode_html_character_references(text)),
            Token::EndTag(tag) => builder.close(&tag),
            Token::StartTag {
                tag,
                attrs,
                self_closing,
            } => {
                let raw = is_raw_text_tag(&tag) && !self_closing;
                let node = builder.open(tag.clone(), attrs, self_closing);
                if raw {
                    let body = reader.raw_text(&tag)?;
                    if !body.is_empty() {
                        // Script and style bodies are not entity-decoded.
                        let text = if matches!(tag.as_str(), "script" | "style") {
                            body.to_string()
                        } else {
                            decode_html_character_references(body)
                        };
                        builder.dom.create_text(node, text);
                    }
                }
            }
        }
    }

    let mut dom = builder.dom;
    dom.initialize_form_control_values()?;
    Ok(dom)
}

enum Token<'a> {
    StartTag {
        tag: String,
        attrs: HashMap<String, String>,
        self_closing: bool,
    },
    EndTag(String),
    Text(&'a str),
}

struct HtmlReader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> HtmlReader<'a> {
    fn rest(&self) -> &'a str {
        let src = self.src;
        &src[self.pos..]
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek_byte().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Advances while `keep` holds and returns the consumed slice.
    fn take_while(&mut self, keep: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek_byte().is_some_and(&keep) {
            self.pos += 1;
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Ok(None);
            }

            if let Some(body) = rest.strip_prefix("<!--") {
                let end = body
                    .find("-->")
                    .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
                self.pos += 4 + end + 3;
                continue;
            }

            if rest.starts_with('<') {
                match rest.as_bytes().get(1) {
                    Some(b) if b.is_ascii_alphabetic() => return self.start_tag().map(Some),
                    Some(b'/') => return self.end_tag().map(|tag| Some(Token::EndTag(tag))),
                    Some(b'!') => {
                        self.skip_declaration()?;
                        continue;
                    }
                    _ => {}
                }
            }

            // Text runs to the next '<', and a lone '<' is text too.
            let first = rest.chars().next().map_or(1, char::len_utf8);
            let len = rest[first..].find('<').map_or(rest.len(), |idx| idx + first);
            self.pos += len;
            return Ok(Some(Token::Text(&rest[..len])));
        }
    }

    fn start_tag(&mut self) -> Result<Token<'a>> {
        self.pos += 1;
        let tag = self.take_while(is_tag_char).to_ascii_lowercase();
        let mut attrs = HashMap::new();

        loop {
            self.skip_ws();
            let rest = self.rest();
            if rest.is_empty() {
                return Err(Error::HtmlParse(format!("unclosed start tag <{tag}")));
            }
            if rest.starts_with('>') {
                self.pos += 1;
                return Ok(Token::StartTag {
                    tag,
                    attrs,
                    self_closing: false,
                });
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                return Ok(Token::StartTag {
                    tag,
                    attrs,
                    self_closing: true,
                });
            }

            let name = self.take_while(is_attr_name_char).to_ascii_lowercase();
            if name.is_empty() {
                // Junk between attributes.
                self.pos += 1;
                continue;
            }
            self.skip_ws();
            let value = if self.peek_byte() == Some(b'=') {
                self.pos += 1;
                self.skip_ws();
                self.attr_value()?
            } else {
                String::new()
            };
            attrs.entry(name).or_insert(value);
        }
    }

    fn attr_value(&mut self) -> Result<String> {
        let raw = match self.peek_byte() {
            None => return Err(Error::HtmlParse("missing attribute value".into())),
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let value = self.take_while(|b| b != quote);
                if self.peek_byte().is_none() {
                    return Err(Error::HtmlParse("unclosed quoted attribute value".into()));
                }
                self.pos += 1;
                value
            }
            Some(_) => self.take_while(|b| !b.is_ascii_whitespace() && b != b'>'),
        };
        Ok(decode_html_character_references(raw))
    }

    fn end_tag(&mut self) -> Result<String> {
        self.pos += 2;
        self.skip_ws();
        let tag = self.take_while(is_tag_char).to_ascii_lowercase();
        self.take_while(|b| b != b'>');
        if self.peek_byte().is_none() {
            return Err(Error::HtmlParse(format!("unclosed end tag </{tag}")));
        }
        self.pos += 1;
        Ok(tag)
    }

    /// `<!DOCTYPE ...>` and friends. Quoted sections may contain `>`.
    fn skip_declaration(&mut self) -> Result<()> {
        self.pos += 2;
        let mut quote = None;
        while let Some(b) = self.peek_byte() {
            self.pos += 1;
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'>') => return Ok(()),
                (None, _) => {}
            }
        }
        Err(Error::HtmlParse("unclosed declaration tag".into()))
    }

    /// The body of a raw-text element up to its end tag, which is consumed.
    fn raw_text(&mut self, tag: &str) -> Result<&'a str> {
        let rest = self.rest();
        let close = find_raw_end_tag(rest, tag)
            .ok_or_else(|| Error::HtmlParse(format!("unclosed <{tag}>")))?;
        self.pos += close;
        self.end_tag()?;
        Ok(&rest[..close])
    }
}

struct TreeBuilder {
    dom: Dom,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    fn new() -> Self {
        let dom = Dom::new();
        let open = vec![dom.root];
        Self { dom, open }
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(self.dom.root)
    }

    fn text(&mut self, text: String) {
        if !text.is_empty() {
            let parent = self.current();
            self.dom.create_text(parent, text);
        }
    }

    fn open(&mut self, tag: String, attrs: HashMap<String, String>, self_closing: bool) -> NodeId {
        self.close_implied_by(&tag);
        let parent = self.current();
        let leaf = self_closing || is_void_tag(&tag) || is_raw_text_tag(&tag);
        let node = self.dom.create_element(parent, tag, attrs);
        if !leaf {
            self.open.push(node);
        }
        node
    }

    /// Closes the innermost open `tag`. End tags with nothing to close are
    /// dropped.
    fn close(&mut self, tag: &str) {
        if let Some(pos) = self
            .open
            .iter()
            .skip(1)
            .rposition(|node| self.dom.tag_name(*node) == Some(tag))
        {
            self.open.truncate(pos + 1);
        }
    }

    /// Start tags that end an unclosed `<li>`, `<option>` or `<p>`.
    fn close_implied_by(&mut self, tag: &str) {
        let (targets, boundaries): (&[&str], &[&str]) = match tag {
            "li" => (&["li"], &["ol", "ul", "menu"]),
            "option" | "optgroup" => (&["option"], &["optgroup", "select", "datalist"]),
            _ if ends_paragraph(tag) => (&["p"], &["button", "div", "section", "form"]),
            _ => return,
        };
        for index in (1..self.open.len()).rev() {
            let Some(open_tag) = self.dom.tag_name(self.open[index]) else {
                continue;
            };
            if targets.contains(&open_tag) {
                self.open.truncate(index);
                return;
            }
            if boundaries.contains(&open_tag) {
                return;
            }
        }
    }
}

pub(crate) fn decode_html_character_references(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let name_len = after
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '#'))
            .unwrap_or(after.len());
        let name = &after[..name_len];
        let decoded = match name.strip_prefix('#') {
            Some(number) => numeric_reference(number),
            None => named_reference(name),
        };
        match decoded {
            Some(ch) => {
                out.push(ch);
                let tail = &after[name_len..];
                rest = tail.strip_prefix(';').unwrap_or(tail);
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn numeric_reference(number: &str) -> Option<char> {
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

fn named_reference(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "eacute" => '\u{00E9}',
        "hellip" => '\u{2026}',
        "middot" => '\u{00B7}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "times" => '\u{00D7}',
        "larr" => '\u{2190}',
        "rarr" => '\u{2192}',
        _ => return None,
    })
}

fn find_raw_end_tag(body: &str, tag: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut from = 0;
    while let Some(idx) = body[from..].find("</") {
        let at = from + idx;
        let name_start = at
            + 2
            + bytes[at + 2..]
                .iter()
                .take_while(|b| b.is_ascii_whitespace())
                .count();
        let name_end = name_start + tag.len();
        if bytes
            .get(name_start..name_end)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag.as_bytes()))
            && !bytes.get(name_end).is_some_and(u8::is_ascii_alphanumeric)
        {
            return Some(at);
        }
        from = at + 2;
    }
    None
}

fn ends_paragraph(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "div"
            | "dl"
            | "fieldset"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "ul"
    )
}

fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "title" | "textarea")
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':'
}

fn is_attr_name_char(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'"' | b'\'' | b'>' | b'/' | b'=' | b'<')
}
