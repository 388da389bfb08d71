// ==========================================
// Gestão de Funcionários - Classificador de duplicatas
// ==========================================
// Três noções de "duplicata" reconciliadas em um veredito único:
// intra-lote (linha anterior no mesmo arquivo) tem precedência sobre
// existente-no-banco; senão, nenhuma
// Determinismo: o veredito de uma linha depende apenas de linhas com
// índice estritamente menor e do estado do banco no momento da consulta
// ==========================================

use crate::domain::funcionario::{CandidatoFuncionario, DuplicateVerdict};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::funcionario_repo::DuplicateLookup;
use std::collections::HashMap;

// ==========================================
// DuplicateClassifier - estado por execução
// ==========================================
// Mantém o mapa (CPF normalizado, CNPJ) → primeira linha vista;
// descartado ao fim da execução
pub struct DuplicateClassifier {
    primeira_ocorrencia: HashMap<(String, String), usize>,
}

impl DuplicateClassifier {
    pub fn new() -> Self {
        Self {
            primeira_ocorrencia: HashMap::new(),
        }
    }

    /// Classifica um candidato e o registra como visto.
    ///
    /// # Retorno
    /// - Ok(veredito): classificação determinística da linha
    /// - Err(DuplicateLookupError): a consulta ao banco falhou; erro de
    ///   linha, distinguível de Ok(None)
    ///
    /// Candidato sem CPF normalizado (formato inválido) nunca é
    /// duplicata: veredito None, e a linha não entra no contexto do lote.
    pub async fn classify(
        &mut self,
        candidato: &CandidatoFuncionario,
        lookup: &dyn DuplicateLookup,
    ) -> ImportResult<DuplicateVerdict> {
        let cpf = match &candidato.cpf_normalizado {
            Some(cpf) => cpf.clone(),
            None => return Ok(DuplicateVerdict::None),
        };

        let chave = (cpf.clone(), candidato.empresa_cnpj.clone());

        // Intra-lote primeiro: a primeira ocorrência em ordem de arquivo
        // é a canônica, e a consulta ao banco nem é emitida
        if let Some(&primeira_linha) = self.primeira_ocorrencia.get(&chave) {
            return Ok(DuplicateVerdict::BatchInternal { primeira_linha });
        }
        self.primeira_ocorrencia.insert(chave, candidato.row_number);

        // Senão, consulta o banco no escopo (CPF, CNPJ)
        match lookup
            .find_by_cpf_in_scope(&cpf, &candidato.empresa_cnpj)
            .await
        {
            Ok(Some(snapshot)) => Ok(DuplicateVerdict::DatabaseExisting {
                funcionario_id: snapshot.funcionario_id.clone(),
                snapshot,
            }),
            Ok(None) => Ok(DuplicateVerdict::None),
            Err(e) => Err(ImportError::DuplicateLookupError {
                row: candidato.row_number,
                message: e.to_string(),
            }),
        }
    }
}

impl Default for DuplicateClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::funcionario::FuncionarioSnapshot;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::error::Error;

    const CNPJ: &str = "11222333000181";

    // Lookup em memória para os testes
    struct MockLookup {
        existentes: HashMap<(String, String), FuncionarioSnapshot>,
        falha: bool,
    }

    impl MockLookup {
        fn vazio() -> Self {
            Self {
                existentes: HashMap::new(),
                falha: false,
            }
        }

        fn com(snapshot: FuncionarioSnapshot) -> Self {
            let mut existentes = HashMap::new();
            existentes.insert(
                (snapshot.cpf.clone(), snapshot.empresa_cnpj.clone()),
                snapshot,
            );
            Self {
                existentes,
                falha: false,
            }
        }

        fn falhando() -> Self {
            Self {
                existentes: HashMap::new(),
                falha: true,
            }
        }
    }

    #[async_trait]
    impl DuplicateLookup for MockLookup {
        async fn find_by_cpf_in_scope(
            &self,
            cpf: &str,
            empresa_cnpj: &str,
        ) -> Result<Option<FuncionarioSnapshot>, Box<dyn Error>> {
            if self.falha {
                return Err("banco indisponível".into());
            }
            Ok(self
                .existentes
                .get(&(cpf.to_string(), empresa_cnpj.to_string()))
                .cloned())
        }
    }

    fn candidato(cpf: Option<&str>, row_number: usize) -> CandidatoFuncionario {
        let mut c = CandidatoFuncionario::vazio(CNPJ, row_number);
        c.cpf_normalizado = cpf.map(|s| s.to_string());
        c
    }

    fn snapshot(cpf: &str) -> FuncionarioSnapshot {
        FuncionarioSnapshot {
            funcionario_id: "func-1".to_string(),
            nome_completo: "Maria Silva".to_string(),
            cpf: cpf.to_string(),
            data_nascimento: NaiveDate::from_ymd_opt(1990, 5, 10).unwrap(),
            cargo: "Analista".to_string(),
            salario_mensal: 4500.0,
            estado_civil: None,
            email: None,
            telefone: None,
            empresa_cnpj: CNPJ.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sem_duplicata() {
        let mut classifier = DuplicateClassifier::new();
        let lookup = MockLookup::vazio();

        let verdict = classifier
            .classify(&candidato(Some("52998224725"), 1), &lookup)
            .await
            .unwrap();

        assert_eq!(verdict, DuplicateVerdict::None);
    }

    #[tokio::test]
    async fn test_intra_lote_assimetrico() {
        // A linha anterior nunca é classificada como duplicata da posterior
        let mut classifier = DuplicateClassifier::new();
        let lookup = MockLookup::vazio();

        let v1 = classifier
            .classify(&candidato(Some("52998224725"), 1), &lookup)
            .await
            .unwrap();
        let v2 = classifier
            .classify(&candidato(Some("52998224725"), 2), &lookup)
            .await
            .unwrap();

        assert_eq!(v1, DuplicateVerdict::None);
        assert_eq!(v2, DuplicateVerdict::BatchInternal { primeira_linha: 1 });
    }

    #[tokio::test]
    async fn test_intra_lote_precede_banco() {
        // Mesmo com registro no banco, a repetição intra-lote vence
        // e referencia a primeira linha do arquivo
        let mut classifier = DuplicateClassifier::new();
        let lookup = MockLookup::com(snapshot("52998224725"));

        let v1 = classifier
            .classify(&candidato(Some("52998224725"), 1), &lookup)
            .await
            .unwrap();
        let v2 = classifier
            .classify(&candidato(Some("52998224725"), 2), &lookup)
            .await
            .unwrap();

        assert!(matches!(v1, DuplicateVerdict::DatabaseExisting { .. }));
        assert_eq!(v2, DuplicateVerdict::BatchInternal { primeira_linha: 1 });
    }

    #[tokio::test]
    async fn test_existente_no_banco() {
        let mut classifier = DuplicateClassifier::new();
        let lookup = MockLookup::com(snapshot("52998224725"));

        let verdict = classifier
            .classify(&candidato(Some("52998224725"), 1), &lookup)
            .await
            .unwrap();

        match verdict {
            DuplicateVerdict::DatabaseExisting {
                funcionario_id,
                snapshot,
            } => {
                assert_eq!(funcionario_id, "func-1");
                assert_eq!(snapshot.cargo, "Analista");
            }
            outro => panic!("esperava DatabaseExisting, veio {:?}", outro),
        }
    }

    #[tokio::test]
    async fn test_mesmo_cpf_escopo_diferente_nao_e_duplicata() {
        let mut classifier = DuplicateClassifier::new();
        let lookup = MockLookup::vazio();

        let mut outro_escopo = candidato(Some("52998224725"), 2);
        outro_escopo.empresa_cnpj = "99888777000166".to_string();

        classifier
            .classify(&candidato(Some("52998224725"), 1), &lookup)
            .await
            .unwrap();
        let v2 = classifier.classify(&outro_escopo, &lookup).await.unwrap();

        assert_eq!(v2, DuplicateVerdict::None);
    }

    #[tokio::test]
    async fn test_sem_cpf_nao_classifica() {
        let mut classifier = DuplicateClassifier::new();
        let lookup = MockLookup::vazio();

        let verdict = classifier
            .classify(&candidato(None, 1), &lookup)
            .await
            .unwrap();

        assert_eq!(verdict, DuplicateVerdict::None);
    }

    #[tokio::test]
    async fn test_falha_de_consulta_vira_erro_de_linha() {
        let mut classifier = DuplicateClassifier::new();
        let lookup = MockLookup::falhando();

        let result = classifier
            .classify(&candidato(Some("52998224725"), 7), &lookup)
            .await;

        match result {
            Err(ImportError::DuplicateLookupError { row, .. }) => assert_eq!(row, 7),
            outro => panic!("esperava DuplicateLookupError, veio {:?}", outro.err()),
        }
    }
}
