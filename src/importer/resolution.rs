// ==========================================
// Gestão de Funcionários - Motor de resolução
// ==========================================
// Decide o desfecho de cada linha a partir de (issues, veredito,
// opções). Tabela de precedência, primeira regra aplicável vence:
// 1. erro + !ignore_errors           → rejeitada (validação)
// 2. erro + ignore_errors            → rejeitada (ignorada)
// 3. strict_validation + warning     → como a regra 1
// 4. duplicata no banco              → por duplicate_handling
// 5. duplicata intra-lote            → pulada, sempre contra a canônica
// 6. caso contrário                  → importada
// A ORDEM É PARTE DO CONTRATO; não reordenar
// ==========================================

use crate::config::ImportOptions;
use crate::domain::funcionario::{
    has_error, has_warning, CampoAlterado, CandidatoFuncionario, DuplicateVerdict,
    FuncionarioSnapshot, RowOutcome, ValidationIssue,
};
use crate::domain::types::DuplicateHandling;

pub struct ResolutionEngine {
    options: ImportOptions,
}

impl ResolutionEngine {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Resolve o desfecho terminal de uma linha. Determinístico:
    /// mesma entrada + mesmas opções → mesmo desfecho.
    pub fn resolve(
        &self,
        candidato: &CandidatoFuncionario,
        issues: &[ValidationIssue],
        verdict: &DuplicateVerdict,
    ) -> RowOutcome {
        // Regras 1-3: problemas bloqueantes têm precedência sobre duplicatas
        let bloqueada = has_error(issues)
            || (self.options.strict_validation && has_warning(issues));
        if bloqueada {
            // Warnings escalados por strict_validation são falha dura,
            // nunca "ignorados": ignore_errors cobre só erros de origem
            if self.options.ignore_errors && has_error(issues) {
                return RowOutcome::RejectedIgnored;
            }
            return RowOutcome::RejectedValidation;
        }

        match verdict {
            // Regra 4: duplicata já persistida, política configurável
            DuplicateVerdict::DatabaseExisting {
                funcionario_id,
                snapshot,
            } => match self.options.effective_duplicate_handling() {
                DuplicateHandling::Ignore => RowOutcome::SkippedDuplicate,
                DuplicateHandling::Update if self.options.update_existing => {
                    RowOutcome::Updated {
                        funcionario_id: funcionario_id.clone(),
                        campos_alterados: diff_campos(candidato, snapshot),
                    }
                }
                // UPDATE sem autorização (update_existing = false) não
                // muta o banco: degrada para pular a duplicata
                DuplicateHandling::Update => RowOutcome::SkippedDuplicate,
                DuplicateHandling::CreateAnyway => RowOutcome::Imported,
            },

            // Regra 5: repetição intra-lote é sempre pulada contra a linha
            // canônica; não existe "atualizar" nem "criar mesmo assim"
            // contra um par ainda não persistido
            DuplicateVerdict::BatchInternal { .. } => RowOutcome::SkippedDuplicate,

            // Regra 6: sem bloqueio e sem duplicata
            DuplicateVerdict::None => RowOutcome::Imported,
        }
    }
}

/// Diff do candidato contra o snapshot capturado na consulta:
/// apenas os campos que de fato mudam entram na atualização
fn diff_campos(
    candidato: &CandidatoFuncionario,
    snapshot: &FuncionarioSnapshot,
) -> Vec<CampoAlterado> {
    let mut diffs = Vec::new();

    let mut push = |campo: &str, de: Option<String>, para: Option<String>| {
        if de != para {
            diffs.push(CampoAlterado {
                campo: campo.to_string(),
                de,
                para,
            });
        }
    };

    push(
        "nome_completo",
        Some(snapshot.nome_completo.clone()),
        candidato.nome_completo.clone(),
    );
    push(
        "data_nascimento",
        Some(snapshot.data_nascimento.to_string()),
        candidato.data_nascimento.map(|d| d.to_string()),
    );
    push(
        "cargo",
        Some(snapshot.cargo.clone()),
        candidato.cargo.clone(),
    );
    push(
        "salario_mensal",
        Some(format!("{:.2}", snapshot.salario_mensal)),
        candidato.salario_mensal.map(|s| format!("{:.2}", s)),
    );
    push(
        "estado_civil",
        snapshot.estado_civil.map(|e| e.to_string()),
        candidato.estado_civil.map(|e| e.to_string()),
    );
    push("email", snapshot.email.clone(), candidato.email.clone());
    push(
        "telefone",
        snapshot.telefone.clone(),
        candidato.telefone.clone(),
    );

    diffs
}
