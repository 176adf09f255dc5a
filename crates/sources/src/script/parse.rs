//! Lexer and recursive-descent parser for call scripts.

use std::ops::Range;

use logos::Logos;
use specula_factory::Field;

use crate::{Result, ScriptError};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"([ \t\r\n]+|#[^\n]*)")]
enum Token {
	#[token("true", |_| true)]
	#[token("false", |_| false)]
	Bool(bool),

	#[token("null")]
	Null,

	#[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
	Int(i64),

	#[regex(r"-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
	Float(f64),

	#[regex(r#""([^"\\]|\\.)*""#, unquote)]
	Str(String),

	#[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
	Ident(String),

	#[token("::")]
	PathSep,

	#[token(":")]
	Colon,

	#[token(",")]
	Comma,

	#[token(";")]
	Semi,

	#[token("(")]
	LParen,

	#[token(")")]
	RParen,

	#[token("[")]
	LBracket,

	#[token("]")]
	RBracket,
}

fn unquote(lex: &mut logos::Lexer<Token>) -> String {
	let slice = lex.slice();
	let inner = &slice[1..slice.len() - 1];
	let mut out = String::with_capacity(inner.len());
	let mut chars = inner.chars();
	while let Some(c) = chars.next() {
		if c != '\\' {
			out.push(c);
			continue;
		}
		match chars.next() {
			Some('n') => out.push('\n'),
			Some('t') => out.push('\t'),
			Some('r') => out.push('\r'),
			Some('0') => out.push('\0'),
			Some(other) => out.push(other),
			None => break,
		}
	}
	out
}

/// One expression of a call script.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
	/// A scalar literal. Bare identifiers and paths such as `Color::Red`
	/// become [`Field::Text`], string literals [`Field::Quoted`].
	Literal(Field),
	/// `Callee(arg, name: arg, ...)`, building one class instance.
	Call { callee: String, args: Vec<Arg> },
	/// `[item, ...]`, filling a sequence parameter.
	List(Vec<Expr>),
}

impl Expr {
	/// Nested expression `index`: an argument of a call or an item of a list.
	pub fn child(&self, index: usize) -> Option<&Expr> {
		match self {
			Expr::Call { args, .. } => args.get(index).map(|arg| &arg.value),
			Expr::List(items) => items.get(index),
			Expr::Literal(_) => None,
		}
	}

	pub fn child_count(&self) -> usize {
		match self {
			Expr::Call { args, .. } => args.len(),
			Expr::List(items) => items.len(),
			Expr::Literal(_) => 0,
		}
	}
}

/// A call argument, optionally named after the parameter it fills.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
	pub name: Option<String>,
	pub value: Expr,
}

/// Parses a script of expressions separated by `;`. Each top-level
/// expression is one unit.
///
/// ```text
/// Person("Ann", 30);
/// Person(name: "Bob", addr: Address(street: "Main"), mood: Mood::Busy)
/// ```
pub fn parse(text: &str) -> Result<Vec<Expr>> {
	let mut tokens = Vec::new();
	let mut lexer = Token::lexer(text);
	while let Some(token) = lexer.next() {
		let span = lexer.span();
		match token {
			Ok(token) => tokens.push((token, span)),
			Err(()) => {
				return Err(ScriptError::Lex {
					offset: span.start,
					text: lexer.slice().to_owned(),
				});
			}
		}
	}

	let mut parser = Parser { text, tokens, pos: 0 };
	let mut units = Vec::new();
	loop {
		while parser.eat(&Token::Semi) {}
		if parser.peek().is_none() {
			break;
		}
		units.push(parser.expr()?);
		match parser.peek() {
			None | Some(Token::Semi) => {}
			Some(_) => return Err(parser.unexpected("`;` or end of input")),
		}
	}
	Ok(units)
}

struct Parser<'s> {
	text: &'s str,
	tokens: Vec<(Token, Range<usize>)>,
	pos: usize,
}

impl Parser<'_> {
	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.pos).map(|(token, _)| token)
	}

	fn peek_second(&self) -> Option<&Token> {
		self.tokens.get(self.pos + 1).map(|(token, _)| token)
	}

	fn bump(&mut self, expected: &'static str) -> Result<Token> {
		let (token, _) = self
			.tokens
			.get(self.pos)
			.cloned()
			.ok_or(ScriptError::UnexpectedEnd { expected })?;
		self.pos += 1;
		Ok(token)
	}

	fn eat(&mut self, token: &Token) -> bool {
		let hit = self.peek() == Some(token);
		if hit {
			self.pos += 1;
		}
		hit
	}

	/// Error for the token at the cursor.
	fn unexpected(&self, expected: &'static str) -> ScriptError {
		match self.tokens.get(self.pos) {
			Some((_, span)) => ScriptError::Unexpected {
				offset: span.start,
				expected,
				found: self.text[span.clone()].to_owned(),
			},
			None => ScriptError::UnexpectedEnd { expected },
		}
	}

	fn expr(&mut self) -> Result<Expr> {
		let field = match self.bump("expression")? {
			Token::Bool(v) => Field::Bool(v),
			Token::Null => Field::Null,
			Token::Int(v) => Field::Int(v),
			Token::Float(v) => Field::Float(v),
			Token::Str(s) => Field::Quoted(s),
			Token::Ident(first) => {
				let path = self.path(first)?;
				if self.eat(&Token::LParen) {
					return self.call(path);
				}
				Field::Text(path)
			}
			Token::LBracket => return self.list(),
			_ => {
				self.pos -= 1;
				return Err(self.unexpected("expression"));
			}
		};
		Ok(Expr::Literal(field))
	}

	fn path(&mut self, first: String) -> Result<String> {
		let mut path = first;
		while self.eat(&Token::PathSep) {
			match self.bump("identifier")? {
				Token::Ident(next) => {
					path.push_str("::");
					path.push_str(&next);
				}
				_ => {
					self.pos -= 1;
					return Err(self.unexpected("identifier"));
				}
			}
		}
		Ok(path)
	}

	/// Arguments after the opening parenthesis.
	fn call(&mut self, callee: String) -> Result<Expr> {
		let mut args = Vec::new();
		loop {
			if self.eat(&Token::RParen) {
				break;
			}
			let name = match (self.peek(), self.peek_second()) {
				(Some(Token::Ident(name)), Some(Token::Colon)) => {
					let name = name.clone();
					self.pos += 2;
					Some(name)
				}
				_ => None,
			};
			let value = self.expr()?;
			args.push(Arg { name, value });
			match self.bump("`,` or `)`")? {
				Token::Comma => {}
				Token::RParen => break,
				_ => {
					self.pos -= 1;
					return Err(self.unexpected("`,` or `)`"));
				}
			}
		}
		Ok(Expr::Call { callee, args })
	}

	/// Items after the opening bracket.
	fn list(&mut self) -> Result<Expr> {
		let mut items = Vec::new();
		loop {
			if self.eat(&Token::RBracket) {
				break;
			}
			items.push(self.expr()?);
			match self.bump("`,` or `]`")? {
				Token::Comma => {}
				Token::RBracket => break,
				_ => {
					self.pos -= 1;
					return Err(self.unexpected("`,` or `]`"));
				}
			}
		}
		Ok(Expr::List(items))
	}
}
