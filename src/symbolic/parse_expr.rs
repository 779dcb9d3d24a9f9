use crate::symbolic::errors::ParseError;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{
    brackets_balanced, find_char_positions_outside_brackets, find_pair_to_this_bracket,
    find_rightmost_binary_operator, find_rightmost_implicit_product, is_identifier,
};
/// a module turns a String expression in calculator notation into a symbolic expression
///# Example
/// ```
/// use latex_calc::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("x^2 - 5*x + 6").unwrap();
/// assert_eq!(parsed_expression.eval_at("x", 2.0).unwrap(), 0.0);
/// ```
//                  search recursion diagram
//                "y^2+exp(x)-log(x)/y"             |
//                |       left          | right     |
//                |_________________________________|
//                |   rightmost binary + or -       |
//                |_________________________________|
//                |  y^2+exp(x)         |log(x)/y   |
//                |       |             |     |     |
//                |_____ \|/            |    \|/    |
//                |   split at +        | split at /|
//                |_____________________|___________|
//                |  y^2   |  exp(x)    |log(x)| y  |
//                |  \|/   |   \|/      |  \|/ |    |
//                | at ^   | function   | func |var |
//                  etc...
//
// Precedence is encoded by the order of the splits: the operator found LAST in the
// string at the loosest level becomes the root, which gives left associativity for
// + - * /. Adjacent operands such as 2(x), (a)(b), (a)sin(x) or pi r multiply at the
// level of * and /. The power operator is split at its FIRST occurrence, which makes it right
// associative, and a leading sign binds looser than ^ so -x^2 = -(x^2).
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    if !brackets_balanced(input) {
        return Err(ParseError::UnbalancedBrackets(input.to_string()));
    }

    // expression that is ALL in brackets
    if input.starts_with('(') && find_pair_to_this_bracket(input, 0) == Some(input.len() - 1) {
        return parse_expression_func(&input[1..input.len() - 1]);
    }

    // addition and subtraction
    if let Some((pos, op)) = find_rightmost_binary_operator(input, &['+', '-']) {
        let left = parse_expression_func(&input[..pos])?;
        let right = parse_expression_func(&input[pos + 1..])?;
        return Ok(match op {
            '+' => Expr::Add(Box::new(left), Box::new(right)),
            _ => Expr::Sub(Box::new(left), Box::new(right)),
        });
    }

    // multiplication and division, explicit or implied by adjacent operands
    let explicit = find_rightmost_binary_operator(input, &['*', '/']);
    let implicit = find_rightmost_implicit_product(input);
    match (explicit, implicit) {
        (Some((pos, op)), implicit) if implicit.is_none_or(|start| pos > start) => {
            let left = parse_expression_func(&input[..pos])?;
            let right = parse_expression_func(&input[pos + 1..])?;
            return Ok(match op {
                '*' => Expr::Mul(Box::new(left), Box::new(right)),
                _ => Expr::Div(Box::new(left), Box::new(right)),
            });
        }
        (_, Some(start)) => {
            let left = parse_expression_func(&input[..start])?;
            let right = parse_expression_func(&input[start..])?;
            return Ok(Expr::Mul(Box::new(left), Box::new(right)));
        }
        _ => {}
    }

    // leading sign
    if let Some(rest) = input.strip_prefix('-') {
        let inner = parse_expression_func(rest)?;
        return Ok(match inner {
            Expr::Const(value) => Expr::Const(-value),
            other => -other,
        });
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_expression_func(rest);
    }

    // power
    if let Some(pos) = find_char_positions_outside_brackets(input, '^') {
        let base = parse_expression_func(&input[..pos])?;
        let exponent = parse_expression_func(&input[pos + 1..])?;
        return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
    }

    // function call name(arg)
    if input.ends_with(')') {
        if let Some(open) = input.find('(') {
            let name = input[..open].trim();
            if is_identifier(name) && find_pair_to_this_bracket(input, open) == Some(input.len() - 1)
            {
                let arg = parse_expression_func(&input[open + 1..input.len() - 1])?;
                return function_from_name(name, arg);
            }
        }
    }

    // constants and variables
    if input.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return input
            .parse::<f64>()
            .map(Expr::Const)
            .map_err(|_| ParseError::InvalidNumber(input.to_string()));
    }
    if is_identifier(input) {
        return Ok(Expr::Var(input.to_string()));
    }

    Err(ParseError::InvalidFormat(input.to_string()))
}

fn function_from_name(name: &str, arg: Expr) -> Result<Expr, ParseError> {
    let arg = Box::new(arg);
    let expr = match name {
        "exp" => Expr::Exp(arg),
        "ln" | "log" => Expr::Ln(arg),
        "log10" => Expr::Log10(arg),
        "sqrt" => Expr::Sqrt(arg),
        "abs" => Expr::Abs(arg),
        "sin" => Expr::sin(arg),
        "cos" => Expr::cos(arg),
        "tan" | "tg" => Expr::tg(arg),
        "cot" | "ctg" => Expr::ctg(arg),
        "asin" | "arcsin" => Expr::arcsin(arg),
        "acos" | "arccos" => Expr::arccos(arg),
        "atan" | "arctan" | "arctg" => Expr::arctg(arg),
        "acot" | "arccot" | "arcctg" => Expr::arcctg(arg),
        _ => return Err(ParseError::UndefinedFunction(name.to_string())),
    };
    Ok(expr)
}

impl Expr {
    /// Parses calculator notation (infix, explicit or implied `*`, function-call syntax).
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        parse_expression_func(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Box<Expr> {
        Box::new(Expr::Var("x".to_string()))
    }

    #[test]
    fn test_parse_exponential() {
        let expr = parse_expression_func("exp(x)").unwrap();
        assert_eq!(expr, Expr::Exp(x()));
    }

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression_func("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
        assert_eq!(parse_expression_func("-2.5").unwrap(), Expr::Const(-2.5));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression_func("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_addition() {
        let expr = parse_expression_func("x + 2").unwrap();
        assert_eq!(expr, Expr::Add(x(), Box::new(Expr::Const(2.0))));
    }

    #[test]
    fn test_parse_division_is_left_associative() {
        let expr = parse_expression_func("x/2/4").unwrap();
        let expected = Expr::Div(
            Box::new(Expr::Div(x(), Box::new(Expr::Const(2.0)))),
            Box::new(Expr::Const(4.0)),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_subtraction_is_left_associative() {
        let result = parse_expression_func("x^2 - x - 1").unwrap();
        let to_check = Expr::Pow(x(), Box::new(Expr::Const(2.0))) - *x() - Expr::Const(1.0);
        assert_eq!(result, to_check);
    }

    #[test]
    fn test_parse_power_is_right_associative() {
        let expr = parse_expression_func("2^3^2").unwrap();
        let expected = Expr::Pow(
            Box::new(Expr::Const(2.0)),
            Box::new(Expr::Pow(
                Box::new(Expr::Const(3.0)),
                Box::new(Expr::Const(2.0)),
            )),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_negation_binds_looser_than_power() {
        let expr = parse_expression_func("-x^2").unwrap();
        assert_eq!(expr, -Expr::Pow(x(), Box::new(Expr::Const(2.0))));
    }

    #[test]
    fn test_parse_negative_exponent() {
        let expr = parse_expression_func("x^-2").unwrap();
        assert_eq!(expr, Expr::Pow(x(), Box::new(Expr::Const(-2.0))));
    }

    #[test]
    fn test_parse_expression_with_brackets() {
        let expr = parse_expression_func("(x + y) * z").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Add(x(), Box::new(Expr::Var("y".to_string())))),
                Box::new(Expr::Var("z".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_implicit_multiplication() {
        assert_eq!(parse_expression_func("2(3+1)").unwrap(), parse_expression_func("2*(3+1)").unwrap());
        assert_eq!(
            parse_expression_func("(x+1)sin(x)").unwrap(),
            parse_expression_func("(x+1)*sin(x)").unwrap()
        );
        assert_eq!(
            parse_expression_func("(1)/(2)sin(0)").unwrap(),
            parse_expression_func("(1)/(2)*sin(0)").unwrap()
        );
        assert_eq!(
            parse_expression_func("pi r^2").unwrap(),
            parse_expression_func("pi*r^2").unwrap()
        );
        assert_eq!(
            parse_expression_func("-2(x)(y)").unwrap(),
            parse_expression_func("-2*x*y").unwrap()
        );
        assert_eq!(parse_expression_func("log10 (x)").unwrap(), Expr::Log10(x()));
    }

    #[test]
    fn test_parse_functions_and_aliases() {
        assert_eq!(parse_expression_func("sqrt(16)").unwrap(), Expr::Sqrt(Box::new(Expr::Const(16.0))));
        assert_eq!(parse_expression_func("tan(x)").unwrap(), Expr::tg(x()));
        assert_eq!(parse_expression_func("tg(x)").unwrap(), Expr::tg(x()));
        assert_eq!(parse_expression_func("log(x)").unwrap(), Expr::Ln(x()));
        assert_eq!(parse_expression_func("abs(x)").unwrap(), Expr::Abs(x()));
        assert_eq!(
            parse_expression_func("sin(cos(x))").unwrap(),
            Expr::sin(Box::new(Expr::cos(x())))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_expression_func(""), Err(ParseError::EmptyExpression));
        assert!(matches!(
            parse_expression_func("(x + y"),
            Err(ParseError::UnbalancedBrackets(_))
        ));
        assert_eq!(
            parse_expression_func("integrate(x)"),
            Err(ParseError::UndefinedFunction("integrate".to_string()))
        );
        assert!(parse_expression_func("x +").is_err());
        assert!(parse_expression_func("1.2.3").is_err());
        assert!(parse_expression_func("x = 2").is_err());
    }
}
