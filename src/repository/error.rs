// ==========================================
// Gestão de Funcionários - Erros da camada de repositório
// ==========================================
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros da camada de repositório
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Erros de banco =====
    #[error("Registro não encontrado: {entity} com id={id}")]
    NotFound { entity: String, id: String },

    #[error("Falha na conexão com o banco: {0}")]
    DatabaseConnectionError(String),

    #[error("Falha ao adquirir o lock do banco: {0}")]
    LockError(String),

    #[error("Falha na transação: {0}")]
    DatabaseTransactionError(String),

    #[error("Falha na consulta: {0}")]
    DatabaseQueryError(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // ===== Erros de serialização de auditoria =====
    #[error("Falha ao serializar resumo de importação: {0}")]
    SummarySerializationError(#[from] serde_json::Error),

    // ===== Genéricos =====
    #[error("Erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "desconhecida".to_string(),
                id: "desconhecido".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Alias de Result da camada
pub type RepositoryResult<T> = Result<T, RepositoryError>;
