use crate::model::graph::Edge;
use sea_orm::DbErr;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("product not found")]
    NotFound,
    #[error("cyclic composition between product ids: {}", display_edges(.0))]
    Cyclic(Vec<Edge<Uuid>>),
    #[error(transparent)]
    Database(anyhow::Error),
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        Self::Database(value.into())
    }
}

fn display_edges(edges: &[Edge<Uuid>]) -> String {
    edges
        .iter()
        .map(|edge| edge.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
