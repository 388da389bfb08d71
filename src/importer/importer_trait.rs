// ==========================================
// Gestão de Funcionários - Trait do importador
// ==========================================
// Interface principal da importação em lote (sem implementação)
// ==========================================

use crate::config::ImportOptions;
use crate::domain::funcionario::ImportRunSummary;
use crate::importer::column_mapper::CampoAlvo;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

// ==========================================
// ImportRequest - entrada de uma execução
// ==========================================
// Mesma (arquivo, request) → mesmo resultado: a execução é
// determinística e reexecutável
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Escopo organizacional da execução (CNPJ opaco)
    pub empresa_cnpj: String,
    /// Vínculos (rótulo da coluna de origem → campo alvo) informados pelo usuário
    pub vinculos: Vec<(String, CampoAlvo)>,
    pub options: ImportOptions,
}

// ==========================================
// Trait FuncionarioImporter
// ==========================================
// Implementador: FuncionarioImporterImpl
#[async_trait]
pub trait FuncionarioImporter: Send + Sync {
    /// Importa um arquivo tabular (.csv/.xlsx/.xls) de funcionários.
    ///
    /// # Fluxo
    /// 1. Leitura do arquivo (cabeçalho + linhas brutas)
    /// 2. Resolução do mapeamento de colunas (fatal se incompleto/conflitante)
    /// 3. Por linha, em ordem: validação → classificação de duplicidade →
    ///    resolução de política → agregação
    /// 4. Aplicação das decisões no banco + registro de auditoria
    ///
    /// # Retorno
    /// - Ok(ImportRunSummary): artefato de auditoria da execução
    /// - Err: apenas condições fatais pré-linha ou falha de aplicação;
    ///   erro de validação de linha nunca aborta a execução
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        request: ImportRequest,
    ) -> ImportResult<ImportRunSummary>;

    /// Variante cancelável: o sinalizador é observado entre linhas.
    /// Execução cancelada devolve o resumo parcial marcado como
    /// incompleto, cobrindo só as linhas totalmente processadas.
    async fn import_from_file_with_cancel<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        request: ImportRequest,
        cancel: Arc<AtomicBool>,
    ) -> ImportResult<ImportRunSummary>;
}
