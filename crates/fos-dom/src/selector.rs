//! Selectors
//!
//! Compound selectors for querySelectorAll-style matching: type, universal,
//! `#id`, `.class`, attribute selectors and `:not()`. Selector lists are
//! comma separated. Combinators are not supported; callers walk subtrees
//! themselves.

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Expected identifier at offset {0}")]
    ExpectedIdentifier(usize),

    #[error("Combinators are not supported (offset {0})")]
    UnsupportedCombinator(usize),

    #[error("Unsupported pseudo-class :{0}")]
    UnsupportedPseudo(String),

    #[error("Unterminated attribute selector")]
    UnterminatedAttribute,

    #[error("Unterminated string")]
    UnterminatedString,
}

/// Something a selector can be matched against
pub trait SelectorTarget {
    /// Lowercase local name
    fn local_name(&self) -> &str;

    /// Attribute lookup (case-insensitive name)
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl SelectorTarget for crate::ElementData {
    fn local_name(&self) -> &str {
        &self.local_name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.get_attr(name)
    }
}

/// Attribute selector operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOperator {
    /// `[a]`
    Exists,
    /// `[a=v]`
    Equals(String),
    /// `[a~=v]` whitespace-separated word
    Includes(String),
    /// `[a|=v]` exact or `v-` prefix
    DashMatch(String),
    /// `[a^=v]`
    Prefix(String),
    /// `[a$=v]`
    Suffix(String),
    /// `[a*=v]`
    Substring(String),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSelector {
    pub name: String,
    pub op: AttrOperator,
}

impl AttrSelector {
    fn matches(&self, target: &dyn SelectorTarget) -> bool {
        let Some(value) = target.attribute(&self.name) else {
            return false;
        };
        match &self.op {
            AttrOperator::Exists => true,
            AttrOperator::Equals(v) => value == v,
            AttrOperator::Includes(v) => value.split_ascii_whitespace().any(|w| w == v),
            AttrOperator::DashMatch(v) => {
                value == v
                    || value
                        .strip_prefix(v.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            AttrOperator::Prefix(v) => !v.is_empty() && value.starts_with(v.as_str()),
            AttrOperator::Suffix(v) => !v.is_empty() && value.ends_with(v.as_str()),
            AttrOperator::Substring(v) => !v.is_empty() && value.contains(v.as_str()),
        }
    }
}

/// A compound selector such as `input[type="image"]:not([alt])`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    /// Type selector; None is universal
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrSelector>,
    pub negations: Vec<CompoundSelector>,
}

impl CompoundSelector {
    /// Check if an element matches every part of this compound
    pub fn matches(&self, target: &dyn SelectorTarget) -> bool {
        if let Some(tag) = &self.tag {
            if !target.local_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if target.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = target.attribute("class").unwrap_or("");
            let has_all = self
                .classes
                .iter()
                .all(|c| class_attr.split_ascii_whitespace().any(|w| w == c));
            if !has_all {
                return false;
            }
        }
        self.attrs.iter().all(|a| a.matches(target))
            && !self.negations.iter().any(|n| n.matches(target))
    }
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<CompoundSelector>,
}

impl Selector {
    /// Parse a selector list
    pub fn parse(s: &str) -> Result<Self, SelectorError> {
        if s.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut parser = Parser { input: s, pos: 0 };
        let compounds = parser.selector_list()?;
        Ok(Self { compounds })
    }

    /// Check if an element matches any selector in the list
    pub fn matches(&self, target: &dyn SelectorTarget) -> bool {
        self.compounds.iter().any(|c| c.matches(target))
    }

    /// Compound selectors in the list
    pub fn compounds(&self) -> &[CompoundSelector] {
        &self.compounds
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Returns true if any whitespace was skipped
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier(start));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn selector_list(&mut self) -> Result<Vec<CompoundSelector>, SelectorError> {
        let mut compounds = Vec::new();
        loop {
            self.skip_ws();
            compounds.push(self.compound()?);
            let skipped = self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.bump();
                }
                Some('>' | '+' | '~') => return Err(SelectorError::UnsupportedCombinator(self.pos)),
                Some(_) if skipped => return Err(SelectorError::UnsupportedCombinator(self.pos)),
                Some(ch) => return Err(SelectorError::UnexpectedChar { ch, pos: self.pos }),
            }
        }
        Ok(compounds)
    }

    fn compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let start = self.pos;
        let mut compound = CompoundSelector::default();

        if self.eat('*') {
            // universal
        } else if self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attrs.push(self.attribute()?);
                }
                Some(':') => {
                    self.bump();
                    let name = self.ident()?;
                    if !name.eq_ignore_ascii_case("not") || !self.eat('(') {
                        return Err(SelectorError::UnsupportedPseudo(name));
                    }
                    self.skip_ws();
                    compound.negations.push(self.compound()?);
                    self.skip_ws();
                    if !self.eat(')') {
                        return Err(match self.peek() {
                            Some(ch) => SelectorError::UnexpectedChar { ch, pos: self.pos },
                            None => SelectorError::UnexpectedChar {
                                ch: ')',
                                pos: self.pos,
                            },
                        });
                    }
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(match self.peek() {
                Some(ch) => SelectorError::UnexpectedChar { ch, pos: self.pos },
                None => SelectorError::Empty,
            });
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttrSelector, SelectorError> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();

        let make: fn(String) -> AttrOperator = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttrSelector {
                    name,
                    op: AttrOperator::Exists,
                });
            }
            Some('=') => AttrOperator::Equals,
            Some('~') => AttrOperator::Includes,
            Some('|') => AttrOperator::DashMatch,
            Some('^') => AttrOperator::Prefix,
            Some('$') => AttrOperator::Suffix,
            Some('*') => AttrOperator::Substring,
            Some(ch) => return Err(SelectorError::UnexpectedChar { ch, pos: self.pos }),
            None => return Err(SelectorError::UnterminatedAttribute),
        };
        if !self.eat('=') {
            self.bump();
            if !self.eat('=') {
                return Err(SelectorError::UnterminatedAttribute);
            }
        }

        self.skip_ws();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                loop {
                    match self.bump() {
                        Some(c) if c == quote => break,
                        Some(_) => {}
                        None => return Err(SelectorError::UnterminatedString),
                    }
                }
                self.input[start..self.pos - quote.len_utf8()].to_string()
            }
            Some(_) => self.ident()?,
            None => return Err(SelectorError::UnterminatedAttribute),
        };
        self.skip_ws();
        if !self.eat(']') {
            return Err(SelectorError::UnterminatedAttribute);
        }

        Ok(AttrSelector {
            name,
            op: make(value),
        })
    }
}
