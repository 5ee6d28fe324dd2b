//! Template types for typed variable injection.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Replace `__NAME__` placeholders in one pass.
///
/// Values are inserted verbatim and never rescanned, so content that
/// happens to contain a placeholder name is left alone.
pub fn fill(content: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(content.len() + extra);
    let mut rest = content;

    while let Some(start) = rest.find("__") {
        let after = &rest[start + 2..];
        let matched = vars.iter().find_map(|(name, value)| {
            after
                .strip_prefix(name)
                .and_then(|tail| tail.strip_prefix("__"))
                .map(|tail| (value, tail))
        });

        match matched {
            Some((value, tail)) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting<'a> {
        name: &'a str,
    }

    impl TemplateVars for Greeting<'_> {
        fn apply(&self, content: &str) -> String {
            fill(content, &[("NAME", self.name)])
        }
    }

    #[test]
    fn test_render() {
        const HELLO: Template<Greeting<'static>> = Template::new("Hello, __NAME__!");
        assert_eq!(HELLO.render(&Greeting { name: "docs" }), "Hello, docs!");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        let out = fill("__A__ and __B__", &[("A", "__B__"), ("B", "b")]);
        assert_eq!(out, "__B__ and b");
    }

    #[test]
    fn test_fill_keeps_unknown_placeholders() {
        assert_eq!(fill("x __UNKNOWN__ y", &[("A", "a")]), "x __UNKNOWN__ y");
        assert_eq!(fill("snake__case", &[]), "snake__case");
    }
}
