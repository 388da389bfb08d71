// ==========================================
// Gestão de Funcionários - Modelo de domínio da importação
// ==========================================
// Entidades do pipeline: linha bruta → candidato → veredito →
// desfecho → resumo de auditoria
// Regra: nenhuma entidade é mutada após criada; derivações
// produzem valores novos
// ==========================================

use crate::domain::types::{EstadoCivil, IssueCode, IssueSeverity};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// RawRow - linha bruta do arquivo tabular
// ==========================================
// Células posicionais alinhadas ao cabeçalho
// Ciclo de vida: termina ao virar CandidatoFuncionario
// ou ao ser rejeitada como malformada
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRow {
    pub row_number: usize,  // Linha no arquivo original (1-based, sem contar cabeçalho)
    pub cells: Vec<String>, // Células cruas, na ordem do cabeçalho
}

impl RawRow {
    pub fn new(row_number: usize, cells: Vec<String>) -> Self {
        Self { row_number, cells }
    }

    /// Linha estruturalmente malformada: contagem de células difere do cabeçalho
    pub fn is_malformed(&self, expected_cells: usize) -> bool {
        self.cells.len() != expected_cells
    }
}

// ==========================================
// CandidatoFuncionario - visão no esquema do sistema
// ==========================================
// Produzido pelo validador a partir de (RawRow, ColumnMapping).
// Campos ficam None quando ausentes ou não interpretáveis;
// os problemas correspondentes vão na lista de ValidationIssue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatoFuncionario {
    // ===== Campos obrigatórios =====
    pub nome_completo: Option<String>,
    pub cpf_normalizado: Option<String>, // 11 dígitos, sem pontuação
    pub data_nascimento: Option<NaiveDate>,
    pub cargo: Option<String>,
    pub salario_mensal: Option<f64>,

    // ===== Campos opcionais =====
    pub estado_civil: Option<EstadoCivil>,
    pub email: Option<String>,
    pub telefone: Option<String>,

    // ===== Escopo e metainformação =====
    pub empresa_cnpj: String, // Escopo organizacional da execução
    pub row_number: usize,
}

impl CandidatoFuncionario {
    /// Candidato vazio para linhas malformadas (só carrega escopo e número da linha)
    pub fn vazio(empresa_cnpj: &str, row_number: usize) -> Self {
        Self {
            nome_completo: None,
            cpf_normalizado: None,
            data_nascimento: None,
            cargo: None,
            salario_mensal: None,
            estado_civil: None,
            email: None,
            telefone: None,
            empresa_cnpj: empresa_cnpj.to_string(),
            row_number,
        }
    }

    /// Materializa o registro persistível. Retorna None se algum
    /// obrigatório estiver ausente (não ocorre após validação sem erros).
    pub fn to_funcionario(&self, funcionario_id: String) -> Option<Funcionario> {
        Some(Funcionario {
            funcionario_id,
            nome_completo: self.nome_completo.clone()?,
            cpf: self.cpf_normalizado.clone()?,
            data_nascimento: self.data_nascimento?,
            cargo: self.cargo.clone()?,
            salario_mensal: self.salario_mensal?,
            estado_civil: self.estado_civil,
            email: self.email.clone(),
            telefone: self.telefone.clone(),
            empresa_cnpj: self.empresa_cnpj.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }
}

// ==========================================
// Funcionario - registro persistido
// ==========================================
// Alinhado à tabela funcionario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Funcionario {
    pub funcionario_id: String, // UUID
    pub nome_completo: String,
    pub cpf: String, // Normalizado, 11 dígitos
    pub data_nascimento: NaiveDate,
    pub cargo: String,
    pub salario_mensal: f64,
    pub estado_civil: Option<EstadoCivil>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub empresa_cnpj: String,

    // ===== Auditoria =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// FuncionarioSnapshot - estado observado no banco
// ==========================================
// Capturado pelo classificador de duplicatas no momento da
// consulta; base do diff na atualização
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncionarioSnapshot {
    pub funcionario_id: String,
    pub nome_completo: String,
    pub cpf: String,
    pub data_nascimento: NaiveDate,
    pub cargo: String,
    pub salario_mensal: f64,
    pub estado_civil: Option<EstadoCivil>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub empresa_cnpj: String,
}

// ==========================================
// ValidationIssue - problema de validação por campo
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,          // Campo do esquema do sistema
    pub severity: IssueSeverity,
    pub code: IssueCode,
    pub message: String,
    pub suggestion: Option<String>, // Correção sugerida, quando derivável
}

impl ValidationIssue {
    pub fn error(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            severity: IssueSeverity::Error,
            code,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn warning(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            severity: IssueSeverity::Warning,
            code,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

/// Há pelo menos um problema com severidade ERROR?
pub fn has_error(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.is_error())
}

/// Há pelo menos um problema com severidade WARNING?
pub fn has_warning(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == IssueSeverity::Warning)
}

// ==========================================
// DuplicateVerdict - classificação de duplicidade
// ==========================================
// No máximo um veredito por candidato; intra-lote tem
// precedência sobre duplicata no banco
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuplicateVerdict {
    /// Nenhuma duplicidade observada
    None,
    /// Linha anterior do mesmo arquivo com o mesmo CPF no mesmo escopo;
    /// a primeira ocorrência (menor índice) é a canônica
    BatchInternal { primeira_linha: usize },
    /// Registro já existente no banco, com snapshot para diff
    DatabaseExisting {
        funcionario_id: String,
        snapshot: FuncionarioSnapshot,
    },
}

// ==========================================
// CampoAlterado - diff de atualização
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampoAlterado {
    pub campo: String,
    pub de: Option<String>,
    pub para: Option<String>,
}

// ==========================================
// RowOutcome - desfecho terminal de uma linha
// ==========================================
// Produzido exatamente uma vez por linha, imutável.
// Warnings não são um desfecho: são overlay contado à parte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowOutcome {
    /// Criação de novo registro
    Imported,
    /// Atualização de registro existente, com os campos que de fato mudam
    Updated {
        funcionario_id: String,
        campos_alterados: Vec<CampoAlterado>,
    },
    /// Pulada por política de duplicata (intra-lote ou banco)
    SkippedDuplicate,
    /// Rejeitada por erro de validação
    RejectedValidation,
    /// Rejeitada mas categorizada como ignorada (ignore_errors = true)
    RejectedIgnored,
}

// ==========================================
// LinhaProcessada - tupla consumida pelo agregador
// ==========================================
#[derive(Debug, Clone)]
pub struct LinhaProcessada {
    pub row_number: usize,
    pub outcome: RowOutcome,
    pub issues: Vec<ValidationIssue>,
    pub verdict: DuplicateVerdict,
    pub cpf: Option<String>,
    pub nome: Option<String>,
}

// ==========================================
// RowDetail - entrada das listas detalhadas do resumo
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowDetail {
    pub row_number: usize,
    pub cpf: Option<String>,
    pub nome: Option<String>,
    /// Preenchido quando a linha referencia um registro existente
    pub funcionario_id: Option<String>,
    /// Linha canônica, quando duplicata intra-lote
    pub linha_canonica: Option<usize>,
    pub mensagens: Vec<String>,
}

// ==========================================
// DetailedResults - listas por categoria, em ordem de linha
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailedResults {
    pub success: Vec<RowDetail>,
    pub errors: Vec<RowDetail>,
    pub warnings: Vec<RowDetail>,
    pub ignored: Vec<RowDetail>,
    pub duplicates: Vec<RowDetail>,
}

// ==========================================
// EscopoAfetado - chave (CPF, CNPJ) alterada pela execução
// ==========================================
// Permite invalidação precisa de caches pelos consumidores,
// em vez de invalidação global
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EscopoAfetado {
    pub cpf: String,
    pub empresa_cnpj: String,
}

// ==========================================
// ImportRunSummary - artefato de auditoria da execução
// ==========================================
// Invariante: total_rows == successful_imports + updated_records
//   + failed_imports + ignored_errors + duplicates_handled
// (warnings são overlay, nunca contados contra o total)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRunSummary {
    pub run_id: String, // UUID da execução
    pub empresa_cnpj: String,
    pub file_name: Option<String>,

    // ===== Contadores exclusivos por linha =====
    pub total_rows: usize,
    pub successful_imports: usize,
    pub updated_records: usize,
    pub failed_imports: usize,
    pub ignored_errors: usize,
    pub duplicates_handled: usize,

    // ===== Overlay =====
    pub warnings: usize,

    // ===== Tempo e completude =====
    pub processing_time: std::time::Duration,
    /// true quando a execução foi cancelada entre linhas:
    /// o resumo cobre apenas as linhas totalmente processadas
    pub incomplete: bool,

    // ===== Detalhamento =====
    pub detailed_results: DetailedResults,
    pub escopos_afetados: BTreeSet<EscopoAfetado>,

    // ===== Auditoria =====
    pub executed_at: DateTime<Utc>,
}

impl ImportRunSummary {
    /// Verifica o invariante de contagem por linha
    pub fn contagem_consistente(&self) -> bool {
        self.total_rows
            == self.successful_imports
                + self.updated_records
                + self.failed_imports
                + self.ignored_errors
                + self.duplicates_handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_malformada() {
        let row = RawRow::new(3, vec!["a".into(), "b".into()]);
        assert!(row.is_malformed(3));
        assert!(!row.is_malformed(2));
    }

    #[test]
    fn test_candidato_to_funcionario_completo() {
        let mut c = CandidatoFuncionario::vazio("11222333000181", 1);
        c.nome_completo = Some("Maria Silva".to_string());
        c.cpf_normalizado = Some("52998224725".to_string());
        c.data_nascimento = NaiveDate::from_ymd_opt(1990, 5, 10);
        c.cargo = Some("Analista".to_string());
        c.salario_mensal = Some(4500.0);

        let f = c.to_funcionario("id-1".to_string());
        assert!(f.is_some());
        let f = f.unwrap();
        assert_eq!(f.cpf, "52998224725");
        assert_eq!(f.empresa_cnpj, "11222333000181");
    }

    #[test]
    fn test_candidato_to_funcionario_incompleto() {
        let c = CandidatoFuncionario::vazio("11222333000181", 1);
        assert!(c.to_funcionario("id-1".to_string()).is_none());
    }

}
