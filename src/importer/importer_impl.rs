// ==========================================
// Gestão de Funcionários - Importador (implementação)
// ==========================================
// Orquestra o pipeline: leitura → mapeamento → por linha:
// validação → classificação → resolução → agregação → aplicação
// Linhas processadas estritamente em ordem: a detecção intra-lote
// exige ordenação total por índice de linha
// ==========================================

use crate::domain::funcionario::{
    CandidatoFuncionario, DuplicateVerdict, ImportRunSummary, LinhaProcessada, RowOutcome,
    ValidationIssue,
};
use crate::domain::types::IssueCode;
use crate::importer::aggregator::ResultAggregator;
use crate::importer::column_mapper::ColumnMapper;
use crate::importer::duplicate_classifier::DuplicateClassifier;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_validator::FieldValidator;
use crate::importer::file_parser::FileParser;
use crate::importer::importer_trait::{FuncionarioImporter, ImportRequest};
use crate::importer::resolution::ResolutionEngine;
use crate::repository::funcionario_repo::{FuncionarioRepository, FuncionarioUpdate};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// FuncionarioImporterImpl
// ==========================================
pub struct FuncionarioImporterImpl<R>
where
    R: FuncionarioRepository,
{
    repo: Arc<R>,
    file_parser: Box<dyn FileParser>,
}

impl<R> FuncionarioImporterImpl<R>
where
    R: FuncionarioRepository,
{
    pub fn new(repo: Arc<R>, file_parser: Box<dyn FileParser>) -> Self {
        Self { repo, file_parser }
    }

    /// Núcleo da execução; `cancel` é observado entre linhas
    async fn executar(
        &self,
        file_path: &Path,
        request: &ImportRequest,
        cancel: Option<&AtomicBool>,
    ) -> ImportResult<ImportRunSummary> {
        let run_id = Uuid::new_v4().to_string();
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string());

        info!(
            run_id = %run_id,
            arquivo = %file_path.display(),
            empresa_cnpj = %request.empresa_cnpj,
            "iniciando importação de funcionários"
        );

        // === Etapa 1: leitura do arquivo (fatal) ===
        debug!("etapa 1: leitura do arquivo");
        let tabela = self.file_parser.parse(file_path)?;
        info!(
            colunas = tabela.headers.len(),
            linhas = tabela.rows.len(),
            "arquivo interpretado"
        );

        // === Etapa 2: mapeamento de colunas (fatal, uma vez por execução) ===
        debug!("etapa 2: resolução do mapeamento de colunas");
        let mapping = ColumnMapper::resolver(&tabela.headers, &request.vinculos)?;

        // === Etapa 3: pipeline por linha, em ordem de arquivo ===
        debug!("etapa 3: processamento por linha");
        let hoje = chrono::Local::now().date_naive();
        let validator = FieldValidator::new(hoje);
        let mut classifier = DuplicateClassifier::new();
        let resolution = ResolutionEngine::new(request.options);
        let mut aggregator =
            ResultAggregator::new(run_id.clone(), request.empresa_cnpj.clone(), file_name);

        let mut creates = Vec::new();
        let mut updates = Vec::new();
        let mut cancelado = false;

        for row in &tabela.rows {
            if let Some(flag) = cancel {
                if flag.load(Ordering::SeqCst) {
                    warn!(run_id = %run_id, linha = row.row_number, "execução cancelada entre linhas");
                    cancelado = true;
                    break;
                }
            }

            let (candidato, mut issues) =
                validator.validar(row, &mapping, &request.empresa_cnpj);

            // Falha de consulta é erro da linha, distinguível de
            // "nenhuma duplicata"; nunca aborta a execução
            let verdict = match classifier.classify(&candidato, self.repo.as_ref()).await {
                Ok(v) => v,
                Err(e) => {
                    warn!(linha = row.row_number, erro = %e, "consulta de duplicidade falhou");
                    issues.push(ValidationIssue::error(
                        "cpf",
                        IssueCode::ConsultaDuplicidade,
                        e.to_string(),
                    ));
                    DuplicateVerdict::None
                }
            };

            let outcome = resolution.resolve(&candidato, &issues, &verdict);
            self.coletar_acao(&candidato, &outcome, &mut creates, &mut updates);

            aggregator.consume(LinhaProcessada {
                row_number: row.row_number,
                cpf: candidato.cpf_normalizado.clone(),
                nome: candidato.nome_completo.clone(),
                outcome,
                issues,
                verdict,
            });
        }

        let summary = aggregator.seal(cancelado);

        // === Etapa 4: aplicação das decisões (linhas já processadas) ===
        debug!(
            criar = creates.len(),
            atualizar = updates.len(),
            "etapa 4: aplicação das decisões"
        );
        if !creates.is_empty() {
            self.repo
                .batch_insert_funcionarios(creates)
                .await
                .map_err(|e| ImportError::ApplyError(e.to_string()))?;
        }
        if !updates.is_empty() {
            self.repo
                .batch_update_funcionarios(updates)
                .await
                .map_err(|e| ImportError::ApplyError(e.to_string()))?;
        }

        // === Etapa 5: auditoria da execução ===
        self.repo
            .insert_import_run(&summary)
            .await
            .map_err(|e| ImportError::AuditError(e.to_string()))?;

        info!(
            run_id = %run_id,
            total = summary.total_rows,
            importados = summary.successful_imports,
            atualizados = summary.updated_records,
            falhas = summary.failed_imports,
            ignorados = summary.ignored_errors,
            duplicatas = summary.duplicates_handled,
            warnings = summary.warnings,
            incompleto = summary.incomplete,
            "importação concluída"
        );

        Ok(summary)
    }

    /// Converte o desfecho em ação de persistência, quando houver
    fn coletar_acao(
        &self,
        candidato: &CandidatoFuncionario,
        outcome: &RowOutcome,
        creates: &mut Vec<crate::domain::funcionario::Funcionario>,
        updates: &mut Vec<FuncionarioUpdate>,
    ) {
        match outcome {
            RowOutcome::Imported => {
                match candidato.to_funcionario(Uuid::new_v4().to_string()) {
                    Some(f) => creates.push(f),
                    // Não ocorre: Imported implica obrigatórios presentes
                    None => warn!(
                        linha = candidato.row_number,
                        "desfecho Imported com candidato incompleto, linha descartada da aplicação"
                    ),
                }
            }
            RowOutcome::Updated {
                funcionario_id,
                campos_alterados,
            } => match candidato.to_funcionario(funcionario_id.clone()) {
                Some(novo) => updates.push(FuncionarioUpdate {
                    funcionario_id: funcionario_id.clone(),
                    novo,
                    campos_alterados: campos_alterados.clone(),
                }),
                None => warn!(
                    linha = candidato.row_number,
                    "desfecho Updated com candidato incompleto, linha descartada da aplicação"
                ),
            },
            RowOutcome::SkippedDuplicate
            | RowOutcome::RejectedValidation
            | RowOutcome::RejectedIgnored => {}
        }
    }
}

#[async_trait::async_trait]
impl<R> FuncionarioImporter for FuncionarioImporterImpl<R>
where
    R: FuncionarioRepository + Send + Sync,
{
    #[instrument(skip(self, file_path, request))]
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        request: ImportRequest,
    ) -> ImportResult<ImportRunSummary> {
        self.executar(file_path.as_ref(), &request, None).await
    }

    #[instrument(skip(self, file_path, request, cancel))]
    async fn import_from_file_with_cancel<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        request: ImportRequest,
        cancel: Arc<AtomicBool>,
    ) -> ImportResult<ImportRunSummary> {
        self.executar(file_path.as_ref(), &request, Some(cancel.as_ref()))
            .await
    }
}
