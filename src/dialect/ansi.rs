//! Standard SQL and the engines that stay close to it.

use super::{Dialect, LimitStyle};

/// Plain standard SQL. Renders `FETCH FIRST` but also reads `LIMIT`.
pub fn ansi() -> Dialect {
    Dialect::base("ansi").accept_limit().position_function()
}

pub fn drill() -> Dialect {
    Dialect::base("drill")
        .limit_style(LimitStyle::LimitOffset)
        .identifier_quote('`', '`')
}

pub fn druid() -> Dialect {
    Dialect::base("druid").limit_style(LimitStyle::LimitOffset)
}

pub fn exasol() -> Dialect {
    Dialect::base("exasol")
        .limit_style(LimitStyle::LimitOffset)
        .limit_comma()
}

pub fn tableau() -> Dialect {
    Dialect::base("tableau")
        .limit_style(LimitStyle::LimitOffset)
        .identifier_quote('[', ']')
        .if_function("IIF")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::FunctionRender;

    #[test]
    fn test_ansi_reads_limit_renders_fetch() {
        let d = ansi();
        assert!(d.parser.limit && d.parser.fetch);
        assert_eq!(d.generator.limit_style, LimitStyle::FetchFirst);
        assert_eq!(d.function_render("STRPOS"), Some(&FunctionRender::Position));
        assert!(d.tokenizer.is_reserved("select"));
        assert!(!d.tokenizer.is_reserved("a"));
    }

    #[test]
    fn test_tableau_brackets() {
        let d = tableau();
        assert_eq!(d.generator.identifier_quote, ('[', ']'));
        assert_eq!(d.tokenizer.identifier_quotes[0], ('[', ']'));
    }
}
