//! End-to-end token sequences for a small scripting-language rule set.
//!
//! The rule set mirrors what a hand-written parser would register: an
//! end-of-line marker, whitespace, words, numbers, `==`, quoted strings,
//! and a one-character fallback that returns the character itself as the
//! token code.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use munch_lexer::{Driver, RuleTable};
use pretty_assertions::assert_eq;

const IGNORE: i32 = 0;
const EOF: i32 = 1;
const WORD: i32 = 2;
const NUMBER: i32 = 3;
const EQUAL: i32 = 4;
const STRING: i32 = 5;

/// The lexeme most recently recorded by an action.
type Lexemes = Arc<Mutex<String>>;

fn script_rules(last: &Lexemes) -> RuleTable<i32> {
    let mut b = RuleTable::builder();
    b.set_ignore_code(IGNORE);

    let l = Arc::clone(last);
    b.set_end_of_input(move |_| {
        l.lock().unwrap().clear();
        EOF
    });
    b.add_rule("$", |_| IGNORE).unwrap();
    b.add_silent_rule("[ \t]+").unwrap();

    let l = Arc::clone(last);
    b.add_rule("[_a-zA-Z][_a-zA-Z0-9]*", move |cur| {
        *l.lock().unwrap() = cur.text().to_string();
        WORD
    })
    .unwrap();

    let l = Arc::clone(last);
    b.add_rule("[-+]?[0-9]+", move |cur| {
        *l.lock().unwrap() = cur.text().to_string();
        NUMBER
    })
    .unwrap();

    let l = Arc::clone(last);
    b.add_rule("==", move |_| {
        l.lock().unwrap().clear();
        EQUAL
    })
    .unwrap();

    for quoted in [r"'[^']*'", r#""[^"]*""#] {
        let l = Arc::clone(last);
        b.add_rule(quoted, move |cur| {
            let text = cur.text();
            *l.lock().unwrap() = text[1..text.len() - 1].to_string();
            STRING
        })
        .unwrap();
    }

    let l = Arc::clone(last);
    b.add_rule(".", move |cur| {
        l.lock().unwrap().clear();
        i32::from(cur.text().as_bytes()[0])
    })
    .unwrap();

    b.build().unwrap()
}

/// Run the script rules over `source` and collect `(code, lexeme)` pairs up
/// to and including end of input.
fn lex(source: &'static str) -> Vec<(i32, String)> {
    let last = Lexemes::default();
    let mut driver = Driver::from_reader(script_rules(&last), source.as_bytes());
    let mut out = Vec::new();
    loop {
        let code = driver.next_token();
        out.push((code, last.lock().unwrap().clone()));
        if code == EOF {
            return out;
        }
        assert!(out.len() < 10_000, "no end of input");
    }
}

fn ch(c: char) -> (i32, &'static str) {
    (c as i32, "")
}

fn expect(tokens: &[(i32, &str)]) -> Vec<(i32, String)> {
    tokens.iter().map(|&(c, s)| (c, s.to_string())).collect()
}

#[test]
fn words_and_punctuation() {
    assert_eq!(
        lex("a, b"),
        expect(&[(WORD, "a"), ch(','), (WORD, "b"), (EOF, "")])
    );
}

#[test]
fn double_equals_outranks_single_equals() {
    assert_eq!(
        lex("i == 0"),
        expect(&[(WORD, "i"), (EQUAL, ""), (NUMBER, "0"), (EOF, "")])
    );
}

#[test]
fn single_equals_falls_back_to_character() {
    assert_eq!(
        lex("i = 1"),
        expect(&[(WORD, "i"), ch('='), (NUMBER, "1"), (EOF, "")])
    );
}

#[test]
fn function_definition() {
    let source = "add a, b:\n\treturn a + b\n";
    assert_eq!(
        lex(source),
        expect(&[
            (WORD, "add"),
            (WORD, "a"),
            ch(','),
            (WORD, "b"),
            ch(':'),
            (WORD, "return"),
            (WORD, "a"),
            ch('+'),
            (WORD, "b"),
            (EOF, ""),
        ])
    );
}

#[test]
fn signed_numbers_beat_operator_fallback() {
    // `+b` is not a number, so `+` falls back to its character code.
    assert_eq!(
        lex("x -12 +b"),
        expect(&[(WORD, "x"), (NUMBER, "-12"), ch('+'), (WORD, "b"), (EOF, "")])
    );
}

#[test]
fn strings_keep_inner_text() {
    assert_eq!(
        lex(r#"print 'single' "double""#),
        expect(&[
            (WORD, "print"),
            (STRING, "single"),
            (STRING, "double"),
            (EOF, ""),
        ])
    );
}

#[test]
fn unterminated_string_falls_back_to_characters() {
    assert_eq!(
        lex("'ab"),
        expect(&[ch('\''), (WORD, "ab"), (EOF, "")])
    );
}

#[test]
fn fizzbuzz_program() {
    let source = r#"
fizzbuzz:
	do i = 1 to 100
		if i % 15 == 0 then
			print "fizzbuzz"
		elseif i % 3 == 0 then
			print "fizz"
		elseif i % 5 == 0 then
			print "buzz"
		else
			print i
		end
	end
end
"#;

    let mut expected = vec![
        (WORD, "fizzbuzz"),
        ch(':'),
        (WORD, "do"),
        (WORD, "i"),
        ch('='),
        (NUMBER, "1"),
        (WORD, "to"),
        (NUMBER, "100"),
    ];
    for (keyword, divisor, word) in [
        ("if", "15", "fizzbuzz"),
        ("elseif", "3", "fizz"),
        ("elseif", "5", "buzz"),
    ] {
        expected.extend([
            (WORD, keyword),
            (WORD, "i"),
            ch('%'),
            (NUMBER, divisor),
            (EQUAL, ""),
            (NUMBER, "0"),
            (WORD, "then"),
            (WORD, "print"),
            (STRING, word),
        ]);
    }
    expected.extend([
        (WORD, "else"),
        (WORD, "print"),
        (WORD, "i"),
        (WORD, "end"),
        (WORD, "end"),
        (WORD, "end"),
        (EOF, ""),
    ]);

    assert_eq!(lex(source), expect(&expected));
}

#[test]
fn end_of_input_repeats() {
    let last = Lexemes::default();
    let mut driver = Driver::from_reader(script_rules(&last), "x".as_bytes());
    assert_eq!(driver.next_token(), WORD);
    for _ in 0..3 {
        assert_eq!(driver.next_token(), EOF);
        assert_eq!(driver.text(), "");
    }
}
