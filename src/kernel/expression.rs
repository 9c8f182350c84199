//! Analogy expressions: `word1 op1 word2 op2 word3`.
//!
//! The first pair defines a direction, the third word is the base it is
//! applied to:
//!
//! ```text
//! direction = word1 op1 word2
//! result    = word3 op2 direction
//! ```
//!
//! So `king - queen + prince` moves `prince` along the queen→king offset.
//!
//! # Example
//!
//! ```rust
//! use vectorscope::{datasets, Expression, ExpressionEvaluator};
//!
//! let store = datasets::royalty();
//! let expr: Expression = "king - queen + prince".parse().unwrap();
//! let op = ExpressionEvaluator::evaluate(&expr, &store).unwrap();
//! assert_eq!(op.result_vector.data(), &[3.5, 1.5]);
//! ```

use crate::error::{Result, VectorscopeError};
use crate::kernel::algebra::{Algebra, Operator};
use crate::kernel::store::EmbeddingStore;
use crate::kernel::vector::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of tokens in a complete expression.
pub const EXPRESSION_LEN: usize = 5;

/// A validated five-token expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub word1: String,
    pub op1: Operator,
    pub word2: String,
    pub op2: Operator,
    pub word3: String,
}

impl Expression {
    pub fn new(
        word1: impl Into<String>,
        op1: Operator,
        word2: impl Into<String>,
        op2: Operator,
        word3: impl Into<String>,
    ) -> Self {
        Self {
            word1: word1.into(),
            op1,
            word2: word2.into(),
            op2,
            word3: word3.into(),
        }
    }

    /// Parse a positional token list.
    ///
    /// Words sit at even positions, operators at odd ones. Anything else,
    /// including a token count other than five, is `MalformedExpression`.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        if tokens.len() != EXPRESSION_LEN {
            return Err(VectorscopeError::MalformedExpression(format!(
                "expected {} tokens, got {}",
                EXPRESSION_LEN,
                tokens.len()
            )));
        }

        let word = |i: usize| -> Result<String> {
            let token = tokens[i].as_ref().trim();
            if token.is_empty() || token.parse::<Operator>().is_ok() {
                return Err(VectorscopeError::MalformedExpression(format!(
                    "expected a word at position {}, got '{}'",
                    i, token
                )));
            }
            Ok(token.to_string())
        };
        let op = |i: usize| -> Result<Operator> {
            tokens[i].as_ref().parse::<Operator>().map_err(|_| {
                VectorscopeError::MalformedExpression(format!(
                    "expected an operator at position {}, got '{}'",
                    i,
                    tokens[i].as_ref()
                ))
            })
        };

        Ok(Self {
            word1: word(0)?,
            op1: op(1)?,
            word2: word(2)?,
            op2: op(3)?,
            word3: word(4)?,
        })
    }

    /// The three words in expression order.
    pub fn words(&self) -> [&str; 3] {
        [&self.word1, &self.word2, &self.word3]
    }
}

impl FromStr for Expression {
    type Err = VectorscopeError;

    /// Whitespace-separated tokens, e.g. `"man - woman + king"`.
    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        Self::from_tokens(&tokens)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.word1, self.op1, self.word2, self.op2, self.word3
        )
    }
}

/// Everything one evaluation produced.
///
/// Built once per successful evaluation and never mutated; downstream
/// ranking and rendering read the retained vectors instead of
/// recomputing them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorOperationResult {
    pub source_word1: String,
    pub source_vector1: Vector,
    pub operator1: Operator,
    pub source_word2: String,
    pub source_vector2: Vector,
    /// `source_vector1 operator1 source_vector2`
    pub direction_vector: Vector,
    /// Operator applying the direction to the base.
    pub operator: Operator,
    pub base_word: String,
    pub base_vector: Vector,
    /// `base_vector operator direction_vector`
    pub result_vector: Vector,
}

impl VectorOperationResult {
    /// Words taking part in the computation, in expression order.
    pub fn active_words(&self) -> [&str; 3] {
        [&self.source_word1, &self.source_word2, &self.base_word]
    }
}

/// Evaluates expressions against a store.
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    /// Evaluate `expr` over `store`.
    ///
    /// All lookups and arithmetic finish before the result is built, so an
    /// error never leaves a partial result behind.
    pub fn evaluate(expr: &Expression, store: &EmbeddingStore) -> Result<VectorOperationResult> {
        let vector1 = store.require(&expr.word1)?;
        let vector2 = store.require(&expr.word2)?;
        let base = store.require(&expr.word3)?;

        let direction = Algebra::apply(expr.op1, vector1, vector2)?;
        let result = Algebra::apply(expr.op2, base, &direction)?;

        tracing::debug!(
            expression = %expr,
            dimensions = result.dimensions(),
            "evaluated expression"
        );

        Ok(VectorOperationResult {
            source_word1: expr.word1.clone(),
            source_vector1: vector1.clone(),
            operator1: expr.op1,
            source_word2: expr.word2.clone(),
            source_vector2: vector2.clone(),
            direction_vector: direction,
            operator: expr.op2,
            base_word: expr.word3.clone(),
            base_vector: base.clone(),
            result_vector: result,
        })
    }

    /// Parse positional tokens and evaluate in one step.
    pub fn evaluate_tokens<S: AsRef<str>>(
        tokens: &[S],
        store: &EmbeddingStore,
    ) -> Result<VectorOperationResult> {
        Self::evaluate(&Expression::from_tokens(tokens)?, store)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Op(Operator),
}

/// Incremental expression entry.
///
/// Words and operators must alternate, starting and ending with a word.
/// A push that would break the shape is refused and the builder is left
/// as it was.
#[derive(Clone, Debug, Default)]
pub struct ExpressionBuilder {
    tokens: Vec<Token>,
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when the next token must be a word.
    pub fn expects_word(&self) -> bool {
        self.tokens.len() % 2 == 0 && self.tokens.len() < EXPRESSION_LEN
    }

    /// True when the next token must be an operator.
    pub fn expects_operator(&self) -> bool {
        self.tokens.len() % 2 == 1 && self.tokens.len() < EXPRESSION_LEN - 1
    }

    pub fn push_word(&mut self, word: impl Into<String>) -> Result<&mut Self> {
        let word = word.into();
        if !self.expects_word() {
            return Err(VectorscopeError::MalformedExpression(format!(
                "no word expected at position {}",
                self.tokens.len()
            )));
        }
        if word.trim().is_empty() {
            return Err(VectorscopeError::MalformedExpression(
                "empty word".to_string(),
            ));
        }
        self.tokens.push(Token::Word(word));
        Ok(self)
    }

    pub fn push_operator(&mut self, op: Operator) -> Result<&mut Self> {
        if !self.expects_operator() {
            return Err(VectorscopeError::MalformedExpression(format!(
                "no operator expected at position {}",
                self.tokens.len()
            )));
        }
        self.tokens.push(Token::Op(op));
        Ok(self)
    }

    /// Whether the expression has all five tokens.
    pub fn is_complete(&self) -> bool {
        self.tokens.len() == EXPRESSION_LEN
    }

    /// Build the expression; fails unless complete.
    pub fn build(&self) -> Result<Expression> {
        match self.tokens.as_slice() {
            [Token::Word(w1), Token::Op(o1), Token::Word(w2), Token::Op(o2), Token::Word(w3)] => {
                Ok(Expression::new(w1.clone(), *o1, w2.clone(), *o2, w3.clone()))
            }
            _ => Err(VectorscopeError::MalformedExpression(format!(
                "incomplete expression with {} of {} tokens",
                self.tokens.len(),
                EXPRESSION_LEN
            ))),
        }
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}
