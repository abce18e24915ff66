//! Experiments on the cost of integer arithmetic alternatives.

pub mod modulo_vs_branch;
