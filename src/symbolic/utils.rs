
// the collection of utility functions for bracket parsing and proceeding
// all positions are byte offsets into the input

/// true when every '(' has a matching ')' and no ')' closes an unopened bracket
pub fn brackets_balanced(s: &str) -> bool {
    let mut depth: i64 = 0;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

// code finds the position of the bracket closing the one opened at `bracket_start`
pub fn find_pair_to_this_bracket(input: &str, bracket_start: usize) -> Option<usize> {
    let mut stack = 0;
    for (i, c) in input[bracket_start..].char_indices() {
        match c {
            '(' => stack += 1,
            ')' => {
                stack -= 1;
                if stack == 0 {
                    return Some(bracket_start + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Rightmost operator from `operators` that sits outside brackets and is used as a
/// binary operator. A '+' or '-' directly after another operator, an opening bracket,
/// a comma or the start of the input is a sign, not an operator.
pub fn find_rightmost_binary_operator(input: &str, operators: &[char]) -> Option<(usize, char)> {
    let mut bracket_depth = 0;
    let mut last_op = None;
    let mut prev_significant: Option<char> = None;

    for (i, c) in input.char_indices() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth -= 1,
            _ if bracket_depth == 0 && operators.contains(&c) => {
                let is_sign = matches!(
                    prev_significant,
                    None | Some('+' | '-' | '*' | '/' | '^' | '(' | ',')
                );
                if !is_sign {
                    last_op = Some((i, c));
                }
            }
            _ => {}
        }
        if !c.is_whitespace() {
            prev_significant = Some(c);
        }
    }
    last_op
}

#[derive(Clone, Copy, PartialEq)]
enum Operand {
    Number,
    Identifier,
    Group,
}

/// Start of the rightmost operand that directly follows another operand outside brackets,
/// i.e. an implicit product: `2(x)`, `(a)(b)`, `(a)sin(x)`, `(a)2`, `2x`, `pi r`.
/// An identifier directly followed by '(' is a function call, not a product.
pub fn find_rightmost_implicit_product(input: &str) -> Option<usize> {
    let mut depth = 0;
    let mut last = None;
    // operand that ended just before the current position, and whether whitespace followed it
    let mut prev: Option<Operand> = None;
    let mut gap = false;

    for (i, c) in input.char_indices() {
        if depth > 0 {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        prev = Some(Operand::Group);
                        gap = false;
                    }
                }
                _ => {}
            }
            continue;
        }
        let current = match c {
            '(' => {
                depth += 1;
                Operand::Group
            }
            _ if c.is_whitespace() => {
                gap = prev.is_some();
                continue;
            }
            _ if c.is_alphabetic() || c == '_' => Operand::Identifier,
            _ if c.is_ascii_digit() || c == '.' => Operand::Number,
            _ => {
                prev = None;
                gap = false;
                continue;
            }
        };
        let continues = match (prev, current) {
            (None, _) => true,
            (Some(Operand::Identifier), Operand::Group) => true,
            (Some(Operand::Identifier), Operand::Number) => !gap,
            (Some(before), now) if before == now && now != Operand::Group => !gap,
            _ => false,
        };
        if !continues {
            last = Some(i);
        }
        // digits inside an identifier keep it an identifier
        prev = match (continues, prev) {
            (true, Some(Operand::Identifier)) if current == Operand::Number => prev,
            _ => Some(current),
        };
        gap = false;
    }
    last
}

// find position of the first given char that is outside brackets
pub fn find_char_positions_outside_brackets(s: &str, target: char) -> Option<usize> {
    let mut depth = 0;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if ch == target && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// identifier: a letter followed by letters, digits or underscores
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}
