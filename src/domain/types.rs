// ==========================================
// Gestão de Funcionários - Tipos de domínio
// ==========================================
// Escopo: enums compartilhados entre importador,
// repositório e relatório de auditoria
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Severidade de problema de validação
// ==========================================
// Regra: ERROR bloqueia persistência da linha,
// WARNING apenas é reportado no resumo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueSeverity {
    Error,   // Bloqueia criação/atualização
    Warning, // Não bloqueia, campo é limpo se necessário
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Error => write!(f, "ERROR"),
            IssueSeverity::Warning => write!(f, "WARNING"),
        }
    }
}

// ==========================================
// Código de problema de validação
// ==========================================
// Cada regra de validação emite um código estável,
// consumido por testes e pela UI de auditoria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    NomeVazio,              // Nome completo vazio após trim
    CpfFormato,             // CPF com tamanho != 11 dígitos após normalização
    CpfDigitosRepetidos,    // CPF da classe conhecida-inválida (11 dígitos iguais)
    CpfChecksum,            // Falha nos dígitos verificadores
    DataNascimentoInvalida, // Data não interpretável
    DataNascimentoFutura,   // Data de nascimento no futuro
    CargoVazio,             // Cargo vazio após trim
    SalarioInvalido,        // Salário não numérico ou <= 0
    OpcionalInvalido,       // Campo opcional inválido (warning, campo limpo)
    ConsultaDuplicidade,    // Falha na consulta de duplicidade ao banco
    LinhaMalformada,        // Contagem de células diferente do cabeçalho
}

// ==========================================
// Estado civil (campo opcional)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoCivil {
    Solteiro,
    Casado,
    Divorciado,
    Viuvo,
    UniaoEstavel,
}

impl EstadoCivil {
    /// Interpreta o valor da célula (tolerante a caixa e grafia comum)
    pub fn parse(valor: &str) -> Option<Self> {
        match valor.trim().to_uppercase().as_str() {
            "SOLTEIRO" | "SOLTEIRA" => Some(EstadoCivil::Solteiro),
            "CASADO" | "CASADA" => Some(EstadoCivil::Casado),
            "DIVORCIADO" | "DIVORCIADA" => Some(EstadoCivil::Divorciado),
            "VIUVO" | "VIÚVO" | "VIUVA" | "VIÚVA" => Some(EstadoCivil::Viuvo),
            "UNIAO ESTAVEL" | "UNIÃO ESTÁVEL" | "UNIAO_ESTAVEL" => Some(EstadoCivil::UniaoEstavel),
            _ => None,
        }
    }
}

impl fmt::Display for EstadoCivil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstadoCivil::Solteiro => write!(f, "SOLTEIRO"),
            EstadoCivil::Casado => write!(f, "CASADO"),
            EstadoCivil::Divorciado => write!(f, "DIVORCIADO"),
            EstadoCivil::Viuvo => write!(f, "VIUVO"),
            EstadoCivil::UniaoEstavel => write!(f, "UNIAO_ESTAVEL"),
        }
    }
}

// ==========================================
// Política de tratamento de duplicatas
// ==========================================
// Efeitos definidos no motor de resolução
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuplicateHandling {
    Ignore,       // Pula a linha, sem mutação no banco
    Update,       // Atualiza o registro existente (requer update_existing)
    CreateAnyway, // Cria novo registro mesmo com duplicata no banco
}

impl fmt::Display for DuplicateHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateHandling::Ignore => write!(f, "IGNORE"),
            DuplicateHandling::Update => write!(f, "UPDATE"),
            DuplicateHandling::CreateAnyway => write!(f, "CREATE_ANYWAY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estado_civil_parse_tolerante() {
        assert_eq!(EstadoCivil::parse("casado"), Some(EstadoCivil::Casado));
        assert_eq!(EstadoCivil::parse("  SOLTEIRA "), Some(EstadoCivil::Solteiro));
        assert_eq!(
            EstadoCivil::parse("União Estável"),
            Some(EstadoCivil::UniaoEstavel)
        );
        assert_eq!(EstadoCivil::parse("desconhecido"), None);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(IssueSeverity::Error.to_string(), "ERROR");
        assert_eq!(IssueSeverity::Warning.to_string(), "WARNING");
    }
}
