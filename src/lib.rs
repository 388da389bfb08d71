// ==========================================
// Gestão de Funcionários - Biblioteca principal
// ==========================================
// Stack: Rust + SQLite
// Escopo: importação em lote e reconciliação de cadastro
// de funcionários (arquivo tabular → banco, com auditoria)
// ==========================================

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - entidades e tipos
pub mod domain;

// Camada de repositório - acesso a dados
pub mod repository;

// Camada de importação - pipeline de arquivo externo
pub mod importer;

// Camada de configuração - opções de execução
pub mod config;

// Sistema de logs
pub mod logging;

// ==========================================
// Reexporta os tipos centrais
// ==========================================

// Tipos de domínio
pub use domain::types::{DuplicateHandling, EstadoCivil, IssueCode, IssueSeverity};

// Entidades de domínio
pub use domain::{
    CandidatoFuncionario, DetailedResults, DuplicateVerdict, EscopoAfetado, Funcionario,
    FuncionarioSnapshot, ImportRunSummary, LinhaProcessada, RawRow, RowDetail, RowOutcome,
    ValidationIssue,
};

// Configuração
pub use config::ImportOptions;

// Pipeline de importação
pub use importer::{
    CampoAlvo, ColumnMapper, ColumnMapping, DuplicateClassifier, FieldValidator,
    FuncionarioImporter, FuncionarioImporterImpl, ImportError, ImportRequest, ImportResult,
    ResolutionEngine, ResultAggregator, UniversalFileParser,
};

// Repositório
pub use repository::{
    DuplicateLookup, FuncionarioRepository, FuncionarioRepositoryImpl, FuncionarioUpdate,
    RepositoryError, RepositoryResult,
};

// ==========================================
// Constantes do sistema
// ==========================================

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Gestão de Funcionários";

// Versão do esquema do banco
pub const DB_VERSION: &str = "v0.1";
