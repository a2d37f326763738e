//! CSS Selector Matching
//!
//! Parses and matches the selector subset used by element queries:
//! type, universal, id, class and attribute selectors, `:not()`, and the
//! descendant and child combinators, joined into comma-separated lists.

use crate::{DomError, DomResult, DomTree, ElementData, NodeId};

/// A single simple selector inside a compound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (lower-cased tag name)
    Type(String),
    /// #id
    Id(String),
    /// .class
    Class(String),
    /// [name] or [name=value]
    Attribute { name: String, value: Option<String> },
    /// :not(compound)
    Not(Vec<SelectorComponent>),
}

impl SelectorComponent {
    fn matches(&self, elem: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Type(tag) => elem.tag_name() == tag,
            Self::Id(id) => elem.id() == Some(id.as_str()),
            Self::Class(class) => elem.class_list().contains(class),
            Self::Attribute { name, value: None } => elem.has_attr(name),
            Self::Attribute { name, value: Some(v) } => elem.get_attr(name) == Some(v.as_str()),
            Self::Not(inner) => !inner.iter().all(|c| c.matches(elem)),
        }
    }
}

/// Relationship between adjacent compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// Complex selector, stored left to right
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Vec<SelectorComponent>>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

impl Selector {
    /// Parse a selector list (`a, b > c`)
    pub fn parse(text: &str) -> DomResult<SelectorList> {
        Parser::new(text).parse_list()
    }

    /// Match against an element in `tree`
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.matches_at(tree, id, self.compounds.len() - 1)
    }

    fn matches_at(&self, tree: &DomTree, id: NodeId, index: usize) -> bool {
        let Some(elem) = tree.element(id) else {
            return false;
        };
        if !self.compounds[index].iter().all(|c| c.matches(elem)) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Child => tree
                .parent(id)
                .is_some_and(|parent| self.matches_at(tree, parent, index - 1)),
            Combinator::Descendant => tree
                .ancestors(id)
                .into_iter()
                .any(|ancestor| self.matches_at(tree, ancestor, index - 1)),
        }
    }
}

/// Comma-separated selector list; matches when any member matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, id))
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, chars: text.chars().collect(), pos: 0 }
    }

    fn error(&self, message: impl Into<String>) -> DomError {
        DomError::Syntax {
            selector: self.text.to_string(),
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn expect(&mut self, want: char) -> DomResult<()> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(self.error(format!("expected '{want}', found '{c}'"))),
            None => Err(self.error(format!("expected '{want}', found end of input"))),
        }
    }

    /// Skips whitespace, returning whether any was skipped
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn parse_list(&mut self) -> DomResult<SelectorList> {
        let mut selectors = vec![self.parse_complex()?];
        while self.peek() == Some(',') {
            self.bump();
            selectors.push(self.parse_complex()?);
        }
        if let Some(c) = self.peek() {
            return Err(self.error(format!("unexpected '{c}'")));
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> DomResult<Selector> {
        self.skip_ws();
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(',') | Some(')') => break,
                Some('>') => {
                    self.bump();
                    self.skip_ws();
                    Combinator::Child
                }
                Some(_) if had_ws => Combinator::Descendant,
                Some(c) => return Err(self.error(format!("unexpected '{c}'"))),
            };
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(Selector { compounds, combinators })
    }

    fn parse_compound(&mut self) -> DomResult<Vec<SelectorComponent>> {
        let mut components = Vec::new();

        match self.peek() {
            Some('*') => {
                self.bump();
                components.push(SelectorComponent::Universal);
            }
            Some(c) if is_ident_start(c) => {
                let tag = self.parse_ident()?;
                components.push(SelectorComponent::Type(tag.to_ascii_lowercase()));
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    components.push(SelectorComponent::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.bump();
                    components.push(SelectorComponent::Class(self.parse_ident()?));
                }
                Some('[') => components.push(self.parse_attribute()?),
                Some(':') => components.push(self.parse_pseudo()?),
                _ => break,
            }
        }

        if components.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a selector, found '{c}'")),
                None => self.error("expected a selector, found end of input"),
            });
        }
        Ok(components)
    }

    fn parse_ident(&mut self) -> DomResult<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected an identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_attribute(&mut self) -> DomResult<SelectorComponent> {
        self.expect('[')?;
        self.skip_ws();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_ws();

        let value = if self.peek() == Some('=') {
            self.bump();
            self.skip_ws();
            let value = match self.peek() {
                Some(quote @ ('"' | '\'')) => {
                    self.bump();
                    let start = self.pos;
                    while self.peek().is_some_and(|c| c != quote) {
                        self.pos += 1;
                    }
                    let value: String = self.chars[start..self.pos].iter().collect();
                    self.expect(quote)?;
                    value
                }
                _ => self.parse_ident()?,
            };
            self.skip_ws();
            Some(value)
        } else {
            None
        };

        self.expect(']')?;
        Ok(SelectorComponent::Attribute { name, value })
    }

    fn parse_pseudo(&mut self) -> DomResult<SelectorComponent> {
        self.expect(':')?;
        let name = self.parse_ident()?.to_ascii_lowercase();
        if name != "not" {
            return Err(self.error(format!("unsupported pseudo-class ':{name}'")));
        }
        self.expect('(')?;
        self.skip_ws();
        let inner = self.parse_compound()?;
        self.skip_ws();
        self.expect(')')?;
        Ok(SelectorComponent::Not(inner))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}
