use super::Alliance;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position has no {0} king")]
    MissingKing(Alliance),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the null move cannot be executed")]
    NullMove,
    #[error("no piece on {0}")]
    NoPiece(String),
    #[error("unknown square `{0}`")]
    UnknownSquare(String),
    #[error(transparent)]
    Board(#[from] BoardError),
}
