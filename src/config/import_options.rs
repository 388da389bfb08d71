// ==========================================
// Gestão de Funcionários - Opções de importação
// ==========================================
// Chaves reconhecidas: skip_duplicates, update_existing,
// strict_validation, ignore_errors, duplicate_handling
// Efeitos aplicados na ordem de precedência do motor de resolução
// ==========================================

use crate::domain::types::DuplicateHandling;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Atalho legado para pular duplicatas (equivale a duplicate_handling = IGNORE)
    pub skip_duplicates: bool,
    /// Autoriza atualização de registros existentes (pré-requisito de UPDATE)
    pub update_existing: bool,
    /// Escala warnings para bloqueantes
    pub strict_validation: bool,
    /// Linhas com erro viram "ignoradas" em vez de falhas duras
    pub ignore_errors: bool,
    /// Política para duplicatas já existentes no banco
    pub duplicate_handling: DuplicateHandling,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            skip_duplicates: false,
            update_existing: false,
            strict_validation: false,
            ignore_errors: false,
            duplicate_handling: DuplicateHandling::Ignore,
        }
    }
}

impl ImportOptions {
    /// `skip_duplicates` tem precedência: quando ligado, força IGNORE
    /// independentemente de `duplicate_handling`
    pub fn effective_duplicate_handling(&self) -> DuplicateHandling {
        if self.skip_duplicates {
            DuplicateHandling::Ignore
        } else {
            self.duplicate_handling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_conservador() {
        let opts = ImportOptions::default();
        assert!(!opts.skip_duplicates);
        assert!(!opts.update_existing);
        assert!(!opts.strict_validation);
        assert!(!opts.ignore_errors);
        assert_eq!(opts.duplicate_handling, DuplicateHandling::Ignore);
    }

    #[test]
    fn test_skip_duplicates_forca_ignore() {
        let opts = ImportOptions {
            skip_duplicates: true,
            duplicate_handling: DuplicateHandling::Update,
            ..Default::default()
        };
        assert_eq!(
            opts.effective_duplicate_handling(),
            DuplicateHandling::Ignore
        );
    }

    #[test]
    fn test_deserializa_parcial() {
        let opts: ImportOptions =
            serde_json::from_str(r#"{"duplicate_handling": "UPDATE", "update_existing": true}"#)
                .unwrap();
        assert!(opts.update_existing);
        assert_eq!(opts.duplicate_handling, DuplicateHandling::Update);
        assert!(!opts.strict_validation);
    }
}
