//! The selector subset the harness understands: type, universal, id, class
//! and attribute tests, the four combinators, and comma-separated lists.
//! Pseudo-classes and pseudo-elements are rejected.

use super::*;

/// A comma-separated selector list. An element matches when any entry does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorList(pub(crate) Vec<ComplexSelector>);

impl SelectorList {
    /// The id of a bare `#id` selector, which can be answered from the index.
    pub(crate) fn lone_id(&self) -> Option<&str> {
        match self.0.as_slice() {
            [only] if only.links.is_empty() => only.subject.lone_id(),
            _ => None,
        }
    }
}

/// Compounds joined by combinators, stored right to left: `subject` is the
/// element being tested and each link walks one step further left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ComplexSelector {
    pub(crate) subject: Compound,
    pub(crate) links: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
    NextSibling,
    LaterSibling,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrMatch>,
}

impl Compound {
    fn lone_id(&self) -> Option<&str> {
        if self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty() {
            self.id.as_deref()
        } else {
            None
        }
    }

    pub(crate) fn matches(&self, element: &Element) -> bool {
        self.tag
            .as_ref()
            .is_none_or(|tag| element.tag_name.eq_ignore_ascii_case(tag))
            && self
                .id
                .as_ref()
                .is_none_or(|id| element.attrs.get("id") == Some(id))
            && self.classes.iter().all(|class| has_class(element, class))
            && self
                .attrs
                .iter()
                .all(|attr| attr.test.holds(element.attrs.get(&attr.name)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttrMatch {
    pub(crate) name: String,
    pub(crate) test: AttrTest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrTest {
    /// `[name]`
    Present,
    /// `[name=v]`
    Equals(String),
    /// `[name^=v]`
    Prefix(String),
    /// `[name$=v]`
    Suffix(String),
    /// `[name*=v]`
    Substring(String),
    /// `[name~=v]`, one whitespace-separated word.
    Word(String),
    /// `[name|=v]`, `v` or `v-...`.
    LangPrefix(String),
}

impl AttrTest {
    fn holds(&self, value: Option<&String>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            Self::Present => true,
            Self::Equals(want) => value == want,
            Self::Prefix(want) => !want.is_empty() && value.starts_with(want.as_str()),
            Self::Suffix(want) => !want.is_empty() && value.ends_with(want.as_str()),
            Self::Substring(want) => !want.is_empty() && value.contains(want.as_str()),
            Self::Word(want) => value.split_ascii_whitespace().any(|word| word == want),
            Self::LangPrefix(want) => value
                .strip_prefix(want.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('-')),
        }
    }
}

pub(crate) fn parse_selector(src: &str) -> Result<SelectorList> {
    let mut parser = SelectorParser {
        src,
        chars: src.chars().collect(),
        pos: 0,
    };
    let list = parser.list()?;
    if parser.pos < parser.chars.len() {
        return Err(parser.unsupported());
    }
    Ok(list)
}

struct SelectorParser<'a> {
    src: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl SelectorParser<'_> {
    fn unsupported(&self) -> Error {
        Error::UnsupportedSelector(self.src.to_string())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn eat(&mut self, want: char) -> bool {
        if self.peek() == Some(want) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skips whitespace and reports whether any was there.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|ch| ch.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn list(&mut self) -> Result<SelectorList> {
        let mut entries = vec![self.complex()?];
        while self.eat(',') {
            entries.push(self.complex()?);
        }
        Ok(SelectorList(entries))
    }

    fn complex(&mut self) -> Result<ComplexSelector> {
        self.skip_ws();
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();
        loop {
            let spaced = self.skip_ws();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::LaterSibling,
                None | Some(',') => break,
                Some(_) if spaced => Combinator::Descendant,
                Some(_) => return Err(self.unsupported()),
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                self.skip_ws();
            }
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }

        let mut compounds = compounds.into_iter().rev();
        let subject = compounds.next().ok_or_else(|| self.unsupported())?;
        let links = combinators.into_iter().rev().zip(compounds).collect();
        Ok(ComplexSelector { subject, links })
    }

    fn compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::default();
        let start = self.pos;

        if !self.eat('*') && self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    let id = self.ident()?;
                    if compound.id.replace(id).is_some() {
                        return Err(self.unsupported());
                    }
                }
                Some('.') => {
                    self.pos += 1;
                    let class = self.ident()?;
                    compound.classes.push(class);
                }
                Some('[') => {
                    self.pos += 1;
                    let attr = self.attr()?;
                    compound.attrs.push(attr);
                }
                Some(':') | Some('*') => return Err(self.unsupported()),
                Some(ch) if is_ident_char(ch) => return Err(self.unsupported()),
                _ => break,
            }
        }

        if self.pos == start {
            return Err(self.unsupported());
        }
        Ok(compound)
    }

    fn ident(&mut self) -> Result<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unsupported());
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// Parses the inside of `[...]`; the opening bracket is already consumed.
    fn attr(&mut self) -> Result<AttrMatch> {
        self.skip_ws();
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| is_ident_char(ch) || ch == ':')
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unsupported());
        }
        let name = self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .to_ascii_lowercase();
        self.skip_ws();

        if self.eat(']') {
            return Ok(AttrMatch {
                name,
                test: AttrTest::Present,
            });
        }

        let op = match self.bump() {
            Some('=') => '=',
            Some(op @ ('^' | '$' | '*' | '~' | '|')) if self.eat('=') => op,
            _ => return Err(self.unsupported()),
        };
        self.skip_ws();
        let value = self.attr_value()?;
        self.skip_ws();
        if !self.eat(']') {
            return Err(self.unsupported());
        }

        let test = match op {
            '^' => AttrTest::Prefix(value),
            '$' => AttrTest::Suffix(value),
            '*' => AttrTest::Substring(value),
            '~' => AttrTest::Word(value),
            '|' => AttrTest::LangPrefix(value),
            _ => AttrTest::Equals(value),
        };
        Ok(AttrMatch { name, test })
    }

    /// A quoted string or a bare run up to whitespace or `]`. Backslash
    /// escapes the next character in both forms.
    fn attr_value(&mut self) -> Result<String> {
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.pos += 1;
                Some(q)
            }
            _ => None,
        };

        let mut value = String::new();
        loop {
            match (self.bump(), quote) {
                (None, _) => return Err(self.unsupported()),
                (Some('\\'), _) => value.push(self.bump().ok_or_else(|| self.unsupported())?),
                (Some(ch), Some(q)) if ch == q => return Ok(value),
                (Some(ch), None) if ch == ']' || ch.is_ascii_whitespace() => {
                    self.pos -= 1;
                    if value.is_empty() {
                        return Err(self.unsupported());
                    }
                    return Ok(value);
                }
                (Some(ch), _) => value.push(ch),
            }
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}
