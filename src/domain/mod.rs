// ==========================================
// Gestão de Funcionários - Camada de domínio
// ==========================================
// Escopo: entidades e tipos do pipeline de importação
// Regra: sem acesso a dados, sem lógica de orquestração
// ==========================================

pub mod funcionario;
pub mod types;

// Reexporta os tipos centrais
pub use funcionario::{
    has_error, has_warning, CampoAlterado, CandidatoFuncionario, DetailedResults,
    DuplicateVerdict, EscopoAfetado, Funcionario, FuncionarioSnapshot, ImportRunSummary,
    LinhaProcessada, RawRow, RowDetail, RowOutcome, ValidationIssue,
};
pub use types::{DuplicateHandling, EstadoCivil, IssueCode, IssueSeverity};
