/// Help content: (section_title, content_text)
pub static HELP_SECTIONS: &[(&str, &str)] = &[
    ("Operators", "\
  +   addition           -   subtraction
  *   multiplication     /   division
  ^   power (or **)      %   modulo
  ( ) grouping           ,   argument separator

Negative exponents need parentheses:  2^(-1)
Implicit multiplication:  2pi   3(4 + 1)   (1 + 1)(2 + 2)"),

    ("Functions", "\
  sin(x)  cos(x)  tan(x)      trigonometric (angle mode)
  asin(x) acos(x) atan(x)     inverse trigonometric
  ln(x)   log(x)  log2(x)     natural, base-10, base-2 log
  logb(x, b)                  log of x in base b
  sqrt(x) root(x, n)          square and nth root
  exp(x)  abs(x)              e^x, absolute value
  fact(n) perm(n, r) comb(n, r)
  rad(x)  deg(x)              angle conversion"),

    ("Constants", "\
  pi      3.14159...
  e       2.71828...
  ans     previous result"),

    ("Memory", "\
  memory      show the memory register
  m+ [v]      add v (or the last result) to memory
  m- [v]      subtract v (or the last result)
  ms v        store v
  mr          recall memory
  mc          clear memory"),

    ("History", "\
  history         show all calculations
  history N       show the last N
  search TEXT     calculations containing TEXT
  clear_history   forget every calculation"),

    ("Settings", "\
  config                      show settings
  angle degrees|radians       trigonometric unit
  decimal N                   digits after the point
  notation fixed|scientific   result format"),

    ("Session", "\
  help          this text
  quit / exit   leave (Ctrl-D also works)"),
];

/// All sections, rendered for a terminal.
pub fn help_text() -> String {
    let mut out = String::new();
    for (title, content) in HELP_SECTIONS {
        out.push_str(&title.to_uppercase());
        out.push('\n');
        out.push_str(content);
        out.push_str("\n\n");
    }
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::builtins::Function;

    #[test]
    fn test_every_function_is_documented() {
        let text = help_text();
        for name in [
            "ln", "log2", "logb", "sqrt", "root", "sin", "cos", "tan", "asin", "acos", "atan",
            "exp", "abs", "fact", "perm", "comb", "rad", "deg",
        ] {
            assert!(Function::lookup(name).is_some());
            assert!(text.contains(&format!("{}(", name)), "{} missing from help", name);
        }
    }

    #[test]
    fn test_sections_rendered_in_order() {
        let text = help_text();
        let ops = text.find("OPERATORS").unwrap();
        let session = text.find("SESSION").unwrap();
        assert!(ops < session);
        assert!(!text.ends_with('\n'));
    }
}
