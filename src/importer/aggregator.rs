// ==========================================
// Gestão de Funcionários - Agregador de resultados
// ==========================================
// Fold puro sobre a sequência ordenada de linhas processadas;
// nenhuma lógica de validação vive aqui
// Invariante: total_rows = sucesso + atualizadas + falhas +
// ignoradas + duplicatas; warnings são overlay não-exclusivo
// ==========================================

use crate::domain::funcionario::{
    has_warning, DetailedResults, DuplicateVerdict, EscopoAfetado, ImportRunSummary,
    LinhaProcessada, RowDetail, RowOutcome,
};
use chrono::Utc;
use std::collections::BTreeSet;
use std::time::Instant;

// ==========================================
// ResultAggregator - acumulação por execução
// ==========================================
// Relógio dispara na primeira linha consumida e sela no fim;
// selar duas vezes não é possível (consome self)
pub struct ResultAggregator {
    run_id: String,
    empresa_cnpj: String,
    file_name: Option<String>,

    total_rows: usize,
    successful_imports: usize,
    updated_records: usize,
    failed_imports: usize,
    ignored_errors: usize,
    duplicates_handled: usize,
    warnings: usize,

    details: DetailedResults,
    escopos_afetados: BTreeSet<EscopoAfetado>,
    started: Option<Instant>,
}

impl ResultAggregator {
    pub fn new(run_id: String, empresa_cnpj: String, file_name: Option<String>) -> Self {
        Self {
            run_id,
            empresa_cnpj,
            file_name,
            total_rows: 0,
            successful_imports: 0,
            updated_records: 0,
            failed_imports: 0,
            ignored_errors: 0,
            duplicates_handled: 0,
            warnings: 0,
            details: DetailedResults::default(),
            escopos_afetados: BTreeSet::new(),
            started: None,
        }
    }

    /// Consome uma linha já decidida. Cada linha cai em exatamente
    /// um balde exclusivo; warning é contado por cima quando a linha
    /// persiste (importada/atualizada) com avisos.
    pub fn consume(&mut self, linha: LinhaProcessada) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
        self.total_rows += 1;

        let detail = self.montar_detail(&linha);

        match &linha.outcome {
            RowOutcome::Imported => {
                self.successful_imports += 1;
                self.registrar_escopo(&linha);
                self.details.success.push(detail.clone());
                if has_warning(&linha.issues) {
                    self.warnings += 1;
                    self.details.warnings.push(detail);
                }
            }
            RowOutcome::Updated { .. } => {
                self.updated_records += 1;
                self.registrar_escopo(&linha);
                self.details.success.push(detail.clone());
                if has_warning(&linha.issues) {
                    self.warnings += 1;
                    self.details.warnings.push(detail);
                }
            }
            RowOutcome::SkippedDuplicate => {
                self.duplicates_handled += 1;
                self.details.duplicates.push(detail);
            }
            RowOutcome::RejectedValidation => {
                self.failed_imports += 1;
                self.details.errors.push(detail);
            }
            RowOutcome::RejectedIgnored => {
                self.ignored_errors += 1;
                self.details.ignored.push(detail);
            }
        }
    }

    /// Sela o resumo. `incomplete = true` marca execução cancelada
    /// entre linhas: o artefato cobre só as linhas já consumidas.
    pub fn seal(self, incomplete: bool) -> ImportRunSummary {
        let processing_time = self
            .started
            .map(|s| s.elapsed())
            .unwrap_or_default();

        ImportRunSummary {
            run_id: self.run_id,
            empresa_cnpj: self.empresa_cnpj,
            file_name: self.file_name,
            total_rows: self.total_rows,
            successful_imports: self.successful_imports,
            updated_records: self.updated_records,
            failed_imports: self.failed_imports,
            ignored_errors: self.ignored_errors,
            duplicates_handled: self.duplicates_handled,
            warnings: self.warnings,
            processing_time,
            incomplete,
            detailed_results: self.details,
            escopos_afetados: self.escopos_afetados,
            executed_at: Utc::now(),
        }
    }

    /// Chaves (CPF, CNPJ) que mudam nesta execução: base para
    /// invalidação precisa de cache pelos consumidores
    fn registrar_escopo(&mut self, linha: &LinhaProcessada) {
        if let Some(cpf) = &linha.cpf {
            self.escopos_afetados.insert(EscopoAfetado {
                cpf: cpf.clone(),
                empresa_cnpj: self.empresa_cnpj.clone(),
            });
        }
    }

    fn montar_detail(&self, linha: &LinhaProcessada) -> RowDetail {
        let (funcionario_id, linha_canonica) = match &linha.verdict {
            DuplicateVerdict::DatabaseExisting { funcionario_id, .. } => {
                (Some(funcionario_id.clone()), None)
            }
            DuplicateVerdict::BatchInternal { primeira_linha } => (None, Some(*primeira_linha)),
            DuplicateVerdict::None => match &linha.outcome {
                RowOutcome::Updated { funcionario_id, .. } => {
                    (Some(funcionario_id.clone()), None)
                }
                _ => (None, None),
            },
        };

        RowDetail {
            row_number: linha.row_number,
            cpf: linha.cpf.clone(),
            nome: linha.nome.clone(),
            funcionario_id,
            linha_canonica,
            mensagens: linha.issues.iter().map(|i| i.message.clone()).collect(),
        }
    }
}
