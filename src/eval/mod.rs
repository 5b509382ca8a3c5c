//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `evaluate(&[Card; 7]) -> EvaluatedHand`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate, evaluate_5card_hand, evaluate_best_hand};
pub use hand_rank::{describe_hand, EvaluatedHand, HandCategory};
