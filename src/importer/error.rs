// ==========================================
// Gestão de Funcionários - Erros do módulo de importação
// ==========================================
// Taxonomia: erros estruturais são fatais antes de qualquer linha;
// erro de validação de linha NUNCA vira variante daqui — é desfecho
// de dado, registrado no resumo
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros fatais (pré-linha) e falhas de infraestrutura da importação
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Erros de arquivo =====
    #[error("arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("formato de arquivo não suportado: {0} (apenas .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("falha de leitura do arquivo: {0}")]
    FileReadError(String),

    #[error("falha ao interpretar planilha Excel: {0}")]
    ExcelParseError(String),

    #[error("falha ao interpretar CSV: {0}")]
    CsvParseError(String),

    #[error("arquivo sem linha de cabeçalho")]
    MissingHeader,

    // ===== Erros estruturais de mapeamento =====
    #[error("mapeamento incompleto: campos obrigatórios sem coluna vinculada: {campos:?}")]
    MappingIncomplete { campos: Vec<String> },

    #[error("conflito de mapeamento: {message}")]
    MappingConflict { message: String },

    // ===== Erros de banco =====
    #[error("falha na consulta de duplicidade (linha {row}): {message}")]
    DuplicateLookupError { row: usize, message: String },

    #[error("falha ao aplicar decisões no banco: {0}")]
    ApplyError(String),

    #[error("falha ao registrar auditoria da execução: {0}")]
    AuditError(String),

    // ===== Genéricos =====
    #[error("erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::ApplyError(err.to_string())
    }
}

/// Alias de Result do módulo
pub type ImportResult<T> = Result<T, ImportError>;
