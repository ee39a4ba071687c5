use calculator_client::{Category, Classification};

/// Marks a recalled memory value in the display
pub const MEMORY_MARKER: char = 'M';

pub fn category(c: char) -> Category {
    match c {
        '0'..='9' => Category::IntegerDigit,
        '.' => Category::DecimalPoint,
        '+' | '-' | '*' | '/' => Category::Operator,
        '(' | ')' => Category::Parenthesis,
        MEMORY_MARKER => Category::MemoryRecall,
        _ => Category::Unknown,
    }
}

/// Tags every character of `input`, whether or not it parses
pub fn classify(input: &str) -> Vec<Classification> {
    input
        .chars()
        .map(|character| Classification {
            character,
            category: category(character),
        })
        .collect()
}
