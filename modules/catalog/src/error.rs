use nutrify_common::error::ErrorInformation;
use nutrify_module_composition as composition;
use nutrify_module_composition::model::graph::Edge;
use sea_orm::DbErr;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} not found!")]
    NotFound(&'static str),
    #[error("{kind} with id: {id} has the same name!")]
    NameConflict { kind: &'static str, id: Uuid },
    #[error("{}", missing_reference(.materials, .products))]
    MissingReference {
        materials: Vec<Uuid>,
        products: Vec<Uuid>,
    },
    #[error(
        "Cyclic Product not allowed! Cycle(s) detected between product ids: {}",
        join_edges(.cycles)
    )]
    CyclicComposition { cycles: Vec<Edge<Uuid>> },
    #[error("{}", duplicate_reference(.materials, .products))]
    DuplicateComposition {
        materials: Vec<Uuid>,
        products: Vec<Uuid>,
    },
    #[error(
        "Please remove products that references this with ID(s): {}",
        join_ids(.ids)
    )]
    HasParentReference { ids: Vec<Uuid> },
    #[error("There's still {count} material(s) tagged to this supplier!")]
    DependencyConflict { count: u64 },
    #[error("Invalid request: {msg}")]
    BadRequest { msg: String },
    #[error(transparent)]
    Database(anyhow::Error),
}

impl Error {
    /// The serializable payload for this error: a machine-checkable kind
    /// plus the human-readable message.
    pub fn information(&self) -> ErrorInformation {
        let kind = match self {
            Self::NotFound(_) => "NotFound",
            Self::NameConflict { .. } => "NameConflict",
            Self::MissingReference { .. } => "MissingReference",
            Self::CyclicComposition { .. } => "CyclicComposition",
            Self::DuplicateComposition { .. } => "DuplicateComposition",
            Self::HasParentReference { .. } => "HasParentReference",
            Self::DependencyConflict { .. } => "DependencyConflict",
            Self::BadRequest { .. } => "BadRequest",
            Self::Database(_) => "Internal",
        };
        ErrorInformation::new(kind, self)
    }
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        Self::Database(value.into())
    }
}

impl From<composition::Error> for Error {
    fn from(value: composition::Error) -> Self {
        match value {
            composition::Error::NotFound => Self::NotFound("Product"),
            composition::Error::Cyclic(cycles) => Self::CyclicComposition { cycles },
            composition::Error::Database(err) => Self::Database(err),
        }
    }
}

fn join_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_edges(edges: &[Edge<Uuid>]) -> String {
    edges
        .iter()
        .map(|edge| edge.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn missing_reference(materials: &[Uuid], products: &[Uuid]) -> String {
    let mut parts = Vec::new();
    if !materials.is_empty() {
        parts.push(format!("Missing Materials with ID(s): {}", join_ids(materials)));
    }
    if !products.is_empty() {
        parts.push(format!("Missing Products with ID(s): {}", join_ids(products)));
    }
    parts.join("; ")
}

fn duplicate_reference(materials: &[Uuid], products: &[Uuid]) -> String {
    let mut parts = Vec::new();
    if !materials.is_empty() {
        parts.push(format!(
            "Duplicate Materials with ID(s): {}",
            join_ids(materials)
        ));
    }
    if !products.is_empty() {
        parts.push(format!(
            "Duplicate Products with ID(s): {}",
            join_ids(products)
        ));
    }
    parts.join("; ")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn information_carries_a_machine_checkable_kind() {
        let id = Uuid::new_v4();
        let information = Error::NameConflict { kind: "Product", id }.information();

        assert_eq!(information.error, "NameConflict");
        assert_eq!(
            information.message,
            format!("Product with id: {id} has the same name!")
        );
    }

    #[test]
    fn missing_reference_lists_ids_by_kind() {
        let material = Uuid::new_v4();
        let product = Uuid::new_v4();

        let error = Error::MissingReference {
            materials: vec![material],
            products: vec![product],
        };
        assert_eq!(
            error.to_string(),
            format!(
                "Missing Materials with ID(s): {material}; Missing Products with ID(s): {product}"
            )
        );

        let error = Error::MissingReference {
            materials: vec![],
            products: vec![product],
        };
        assert_eq!(
            error.to_string(),
            format!("Missing Products with ID(s): {product}")
        );
    }

    #[test]
    fn cyclic_message_lists_every_offending_edge() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let error = Error::CyclicComposition {
            cycles: vec![Edge { from: a, to: b }, Edge { from: b, to: a }],
        };
        assert_eq!(
            error.to_string(),
            format!(
                "Cyclic Product not allowed! Cycle(s) detected between product ids: \
                 (From: {a}, To: {b}), (From: {b}, To: {a})"
            )
        );
    }

    #[test]
    fn guard_messages_name_what_blocks_them() {
        let id = Uuid::new_v4();

        let error = Error::HasParentReference { ids: vec![id] };
        assert_eq!(
            error.to_string(),
            format!("Please remove products that references this with ID(s): {id}")
        );

        let error = Error::DependencyConflict { count: 3 };
        assert_eq!(
            error.to_string(),
            "There's still 3 material(s) tagged to this supplier!"
        );
    }
}
