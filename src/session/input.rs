use anyhow::Result;

/// Shell-style split: whitespace separates tokens, single or double quotes
/// group, backslash escapes the next character (outside single quotes).
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut quote: Option<char> = None;
    let mut escape = false;
    let mut has_token = false;

    for ch in input.chars() {
        if escape {
            cur.push(ch);
            escape = false;
            continue;
        }

        match (quote, ch) {
            (Some('\''), '\'') => quote = None,
            (Some('\''), c) => cur.push(c),
            (_, '\\') => {
                escape = true;
                has_token = true;
            }
            (Some('"'), '"') => quote = None,
            (None, '"' | '\'') => {
                quote = Some(ch);
                has_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if has_token {
                    out.push(std::mem::take(&mut cur));
                    has_token = false;
                }
            }
            (_, c) => {
                cur.push(c);
                has_token = true;
            }
        }
    }

    if escape {
        anyhow::bail!("dangling escape");
    }
    if quote.is_some() {
        anyhow::bail!("unterminated quote");
    }
    if has_token {
        out.push(cur);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/session/input_tests.rs"]
mod tests;
