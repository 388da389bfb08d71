// ==========================================
// Gestão de Funcionários - Validador de campos
// ==========================================
// Entrada: uma RawRow + ColumnMapping
// Saída: CandidatoFuncionario + sequência ordenada de ValidationIssue
// Regra: falha de validação é desfecho de dado, nunca erro fatal;
// opcionais inválidos viram warning e o campo é limpo
// ==========================================

use crate::domain::funcionario::{CandidatoFuncionario, RawRow, ValidationIssue};
use crate::domain::types::{EstadoCivil, IssueCode};
use crate::importer::column_mapper::{CampoAlvo, ColumnMapping};
use crate::importer::cpf::{self, CpfValidacao};
use chrono::NaiveDate;

pub struct FieldValidator {
    /// Data de referência para "nascimento no futuro" (injetável em teste)
    hoje: NaiveDate,
}

impl FieldValidator {
    pub fn new(hoje: NaiveDate) -> Self {
        Self { hoje }
    }

    /// Valida uma linha e materializa o candidato no esquema do sistema.
    ///
    /// Linha malformada (contagem de células ≠ cabeçalho) produz um
    /// candidato vazio com um único issue bloqueante.
    pub fn validar(
        &self,
        row: &RawRow,
        mapping: &ColumnMapping,
        empresa_cnpj: &str,
    ) -> (CandidatoFuncionario, Vec<ValidationIssue>) {
        if row.is_malformed(mapping.total_colunas()) {
            let issue = ValidationIssue::error(
                "linha",
                IssueCode::LinhaMalformada,
                format!(
                    "linha com {} células, cabeçalho tem {}",
                    row.cells.len(),
                    mapping.total_colunas()
                ),
            );
            return (
                CandidatoFuncionario::vazio(empresa_cnpj, row.row_number),
                vec![issue],
            );
        }

        let mut candidato = CandidatoFuncionario::vazio(empresa_cnpj, row.row_number);
        let mut issues = Vec::new();

        self.validar_nome(row, mapping, &mut candidato, &mut issues);
        self.validar_cpf(row, mapping, &mut candidato, &mut issues);
        self.validar_nascimento(row, mapping, &mut candidato, &mut issues);
        self.validar_cargo(row, mapping, &mut candidato, &mut issues);
        self.validar_salario(row, mapping, &mut candidato, &mut issues);
        self.validar_opcionais(row, mapping, &mut candidato, &mut issues);

        (candidato, issues)
    }

    fn validar_nome(
        &self,
        row: &RawRow,
        mapping: &ColumnMapping,
        candidato: &mut CandidatoFuncionario,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let valor = mapping
            .valor(&row.cells, CampoAlvo::NomeCompleto)
            .unwrap_or("")
            .trim();
        if valor.is_empty() {
            issues.push(ValidationIssue::error(
                "nome_completo",
                IssueCode::NomeVazio,
                "nome completo vazio",
            ));
        } else {
            candidato.nome_completo = Some(valor.to_string());
        }
    }

    fn validar_cpf(
        &self,
        row: &RawRow,
        mapping: &ColumnMapping,
        candidato: &mut CandidatoFuncionario,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let bruto = mapping.valor(&row.cells, CampoAlvo::Cpf).unwrap_or("");
        let normalizado = cpf::normalizar(bruto);

        match cpf::validar(&normalizado) {
            CpfValidacao::Valido => {
                candidato.cpf_normalizado = Some(normalizado);
            }
            CpfValidacao::TamanhoInvalido(len) => {
                issues.push(ValidationIssue::error(
                    "cpf",
                    IssueCode::CpfFormato,
                    format!("CPF com {} dígitos após normalização, esperado 11", len),
                ));
            }
            CpfValidacao::DigitosRepetidos => {
                issues.push(ValidationIssue::error(
                    "cpf",
                    IssueCode::CpfDigitosRepetidos,
                    format!("CPF {} pertence à classe conhecida-inválida", normalizado),
                ));
            }
            CpfValidacao::ChecksumInvalido => {
                issues.push(ValidationIssue::error(
                    "cpf",
                    IssueCode::CpfChecksum,
                    "dígitos verificadores do CPF não conferem",
                ));
            }
        }
    }

    fn validar_nascimento(
        &self,
        row: &RawRow,
        mapping: &ColumnMapping,
        candidato: &mut CandidatoFuncionario,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let valor = mapping
            .valor(&row.cells, CampoAlvo::DataNascimento)
            .unwrap_or("")
            .trim();

        match parse_data(valor) {
            Some(data) if data > self.hoje => {
                issues.push(ValidationIssue::error(
                    "data_nascimento",
                    IssueCode::DataNascimentoFutura,
                    format!("data de nascimento {} está no futuro", data),
                ));
            }
            Some(data) => {
                candidato.data_nascimento = Some(data);
            }
            None => {
                issues.push(
                    ValidationIssue::error(
                        "data_nascimento",
                        IssueCode::DataNascimentoInvalida,
                        format!("data não interpretável: '{}'", valor),
                    )
                    .with_suggestion("use o formato DD/MM/AAAA ou AAAA-MM-DD"),
                );
            }
        }
    }

    fn validar_cargo(
        &self,
        row: &RawRow,
        mapping: &ColumnMapping,
        candidato: &mut CandidatoFuncionario,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let valor = mapping
            .valor(&row.cells, CampoAlvo::Cargo)
            .unwrap_or("")
            .trim();
        if valor.is_empty() {
            issues.push(ValidationIssue::error(
                "cargo",
                IssueCode::CargoVazio,
                "cargo vazio",
            ));
        } else {
            candidato.cargo = Some(valor.to_string());
        }
    }

    fn validar_salario(
        &self,
        row: &RawRow,
        mapping: &ColumnMapping,
        candidato: &mut CandidatoFuncionario,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let valor = mapping
            .valor(&row.cells, CampoAlvo::Salario)
            .unwrap_or("")
            .trim();

        match parse_salario(valor) {
            Some(salario) if salario > 0.0 => {
                candidato.salario_mensal = Some(salario);
            }
            Some(salario) => {
                issues.push(ValidationIssue::error(
                    "salario_mensal",
                    IssueCode::SalarioInvalido,
                    format!("salário deve ser positivo, veio {}", salario),
                ));
            }
            None => {
                issues.push(ValidationIssue::error(
                    "salario_mensal",
                    IssueCode::SalarioInvalido,
                    format!("salário não numérico: '{}'", valor),
                ));
            }
        }
    }

    /// Opcionais inválidos: warning + campo limpo, linha nunca rejeitada
    fn validar_opcionais(
        &self,
        row: &RawRow,
        mapping: &ColumnMapping,
        candidato: &mut CandidatoFuncionario,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if let Some(valor) = mapping.valor(&row.cells, CampoAlvo::EstadoCivil) {
            let valor = valor.trim();
            if !valor.is_empty() {
                match EstadoCivil::parse(valor) {
                    Some(ec) => candidato.estado_civil = Some(ec),
                    None => issues.push(ValidationIssue::warning(
                        "estado_civil",
                        IssueCode::OpcionalInvalido,
                        format!("estado civil não reconhecido: '{}', campo limpo", valor),
                    )),
                }
            }
        }

        if let Some(valor) = mapping.valor(&row.cells, CampoAlvo::Email) {
            let valor = valor.trim();
            if !valor.is_empty() {
                if email_plausivel(valor) {
                    candidato.email = Some(valor.to_string());
                } else {
                    issues.push(ValidationIssue::warning(
                        "email",
                        IssueCode::OpcionalInvalido,
                        format!("email inválido: '{}', campo limpo", valor),
                    ));
                }
            }
        }

        if let Some(valor) = mapping.valor(&row.cells, CampoAlvo::Telefone) {
            let valor = valor.trim();
            if !valor.is_empty() {
                let digitos: String = valor.chars().filter(|c| c.is_ascii_digit()).collect();
                // Fixo (10) ou celular (11), com DDD
                if digitos.len() == 10 || digitos.len() == 11 {
                    candidato.telefone = Some(digitos);
                } else {
                    issues.push(ValidationIssue::warning(
                        "telefone",
                        IssueCode::OpcionalInvalido,
                        format!("telefone com {} dígitos, campo limpo", digitos.len()),
                    ));
                }
            }
        }
    }
}

/// Formatos aceitos: DD/MM/AAAA, AAAA-MM-DD, AAAAMMDD
fn parse_data(valor: &str) -> Option<NaiveDate> {
    if valor.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(valor, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(valor, "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(valor, "%Y%m%d"))
        .ok()
}

/// Aceita separador decimal brasileiro ("4.500,00") e ponto ("4500.00")
fn parse_salario(valor: &str) -> Option<f64> {
    if valor.is_empty() {
        return None;
    }
    let limpo = valor
        .trim_start_matches("R$")
        .trim()
        .to_string();

    // Vírgula presente: interpreta como separador decimal pt-BR
    let normalizado = if limpo.contains(',') {
        limpo.replace('.', "").replace(',', ".")
    } else {
        limpo
    };

    normalizado.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn email_plausivel(valor: &str) -> bool {
    let partes: Vec<&str> = valor.split('@').collect();
    partes.len() == 2
        && !partes[0].is_empty()
        && partes[1].contains('.')
        && !partes[1].starts_with('.')
        && !partes[1].ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::funcionario::{has_error, has_warning};
    use crate::importer::column_mapper::ColumnMapper;

    const CNPJ: &str = "11222333000181";

    fn mapping_padrao() -> ColumnMapping {
        let headers: Vec<String> = [
            "Nome", "CPF", "Nascimento", "Cargo", "Salário", "Estado Civil", "Email", "Telefone",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let vinculos = vec![
            ("Nome".to_string(), CampoAlvo::NomeCompleto),
            ("CPF".to_string(), CampoAlvo::Cpf),
            ("Nascimento".to_string(), CampoAlvo::DataNascimento),
            ("Cargo".to_string(), CampoAlvo::Cargo),
            ("Salário".to_string(), CampoAlvo::Salario),
            ("Estado Civil".to_string(), CampoAlvo::EstadoCivil),
            ("Email".to_string(), CampoAlvo::Email),
            ("Telefone".to_string(), CampoAlvo::Telefone),
        ];
        ColumnMapper::resolver(&headers, &vinculos).unwrap()
    }

    fn row(cells: &[&str]) -> RawRow {
        RawRow::new(1, cells.iter().map(|c| c.to_string()).collect())
    }

    fn validator() -> FieldValidator {
        FieldValidator::new(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap())
    }

    #[test]
    fn test_linha_limpa() {
        let (candidato, issues) = validator().validar(
            &row(&[
                "Maria Silva",
                "529.982.247-25",
                "10/05/1990",
                "Analista",
                "4.500,00",
                "Casada",
                "maria@empresa.com.br",
                "(11) 98765-4321",
            ]),
            &mapping_padrao(),
            CNPJ,
        );

        assert!(issues.is_empty());
        assert_eq!(candidato.cpf_normalizado.as_deref(), Some("52998224725"));
        assert_eq!(candidato.salario_mensal, Some(4500.0));
        assert_eq!(candidato.estado_civil, Some(EstadoCivil::Casado));
        assert_eq!(candidato.telefone.as_deref(), Some("11987654321"));
        assert_eq!(
            candidato.data_nascimento,
            NaiveDate::from_ymd_opt(1990, 5, 10)
        );
    }

    #[test]
    fn test_cpf_digitos_repetidos_rejeitado() {
        // Cenário A: 11111111111 rejeitado independentemente dos demais campos
        let (_, issues) = validator().validar(
            &row(&[
                "Maria Silva",
                "111.111.111-11",
                "10/05/1990",
                "Analista",
                "4500",
                "",
                "",
                "",
            ]),
            &mapping_padrao(),
            CNPJ,
        );

        assert!(has_error(&issues));
        assert!(issues
            .iter()
            .any(|i| i.code == IssueCode::CpfDigitosRepetidos));
    }

    #[test]
    fn test_cpf_checksum_invalido() {
        let (_, issues) = validator().validar(
            &row(&["Maria", "52998224724", "10/05/1990", "Analista", "4500", "", "", ""]),
            &mapping_padrao(),
            CNPJ,
        );

        assert!(issues.iter().any(|i| i.code == IssueCode::CpfChecksum));
    }

    #[test]
    fn test_nome_vazio() {
        let (_, issues) = validator().validar(
            &row(&["   ", "52998224725", "10/05/1990", "Analista", "4500", "", "", ""]),
            &mapping_padrao(),
            CNPJ,
        );

        assert!(issues.iter().any(|i| i.code == IssueCode::NomeVazio));
    }

    #[test]
    fn test_nascimento_futuro() {
        let (_, issues) = validator().validar(
            &row(&["Maria", "52998224725", "2030-01-01", "Analista", "4500", "", "", ""]),
            &mapping_padrao(),
            CNPJ,
        );

        assert!(issues
            .iter()
            .any(|i| i.code == IssueCode::DataNascimentoFutura));
    }

    #[test]
    fn test_salario_nao_positivo() {
        let (_, issues) = validator().validar(
            &row(&["Maria", "52998224725", "10/05/1990", "Analista", "-10", "", "", ""]),
            &mapping_padrao(),
            CNPJ,
        );

        assert!(issues.iter().any(|i| i.code == IssueCode::SalarioInvalido));
    }

    #[test]
    fn test_opcional_invalido_vira_warning_e_campo_limpo() {
        let (candidato, issues) = validator().validar(
            &row(&[
                "Maria",
                "52998224725",
                "10/05/1990",
                "Analista",
                "4500",
                "complicado",
                "sem-arroba",
                "123",
            ]),
            &mapping_padrao(),
            CNPJ,
        );

        assert!(!has_error(&issues));
        assert!(has_warning(&issues));
        assert_eq!(issues.len(), 3);
        assert_eq!(candidato.estado_civil, None);
        assert_eq!(candidato.email, None);
        assert_eq!(candidato.telefone, None);
    }

    #[test]
    fn test_linha_malformada() {
        let (candidato, issues) =
            validator().validar(&row(&["Maria", "52998224725"]), &mapping_padrao(), CNPJ);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::LinhaMalformada);
        assert!(issues[0].is_error());
        assert!(candidato.cpf_normalizado.is_none());
    }

    #[test]
    fn test_parse_salario_formatos() {
        assert_eq!(parse_salario("4500"), Some(4500.0));
        assert_eq!(parse_salario("4500.50"), Some(4500.5));
        assert_eq!(parse_salario("4.500,50"), Some(4500.5));
        assert_eq!(parse_salario("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_salario("abc"), None);
    }
}
