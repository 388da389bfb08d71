// ==========================================
// Gestão de Funcionários - Repositório (rusqlite)
// ==========================================
// Responsabilidade: acesso a dados da importação
// Regra: repositório não contém regra de negócio, só CRUD
// ==========================================

use crate::domain::funcionario::{
    DetailedResults, EscopoAfetado, Funcionario, FuncionarioSnapshot, ImportRunSummary,
};
use crate::domain::types::EstadoCivil;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::funcionario_repo::{
    DuplicateLookup, FuncionarioRepository, FuncionarioUpdate,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, Transaction};
use std::collections::BTreeSet;
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// FuncionarioRepositoryImpl
// ==========================================
pub struct FuncionarioRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl FuncionarioRepositoryImpl {
    /// Abre (ou cria) o banco no caminho indicado e garante o esquema
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = Connection::open(db_path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;

        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// Constrói sobre uma conexão compartilhada já aberta
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// Banco em memória (apoio a testes)
    pub fn in_memory() -> Result<Self, Box<dyn Error>> {
        let conn = Connection::open_in_memory()?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_schema()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn ensure_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS funcionario (
              funcionario_id TEXT PRIMARY KEY,
              nome_completo TEXT NOT NULL,
              cpf TEXT NOT NULL,
              data_nascimento TEXT NOT NULL,
              cargo TEXT NOT NULL,
              salario_mensal REAL NOT NULL,
              estado_civil TEXT,
              email TEXT,
              telefone TEXT,
              empresa_cnpj TEXT NOT NULL,
              created_at TEXT NOT NULL,
              updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_funcionario_cpf_empresa
              ON funcionario(cpf, empresa_cnpj);
            CREATE INDEX IF NOT EXISTS idx_funcionario_empresa
              ON funcionario(empresa_cnpj);

            CREATE TABLE IF NOT EXISTS import_run (
              run_id TEXT PRIMARY KEY,
              empresa_cnpj TEXT NOT NULL,
              file_name TEXT,
              total_rows INTEGER NOT NULL,
              successful_imports INTEGER NOT NULL,
              updated_records INTEGER NOT NULL,
              failed_imports INTEGER NOT NULL,
              ignored_errors INTEGER NOT NULL,
              duplicates_handled INTEGER NOT NULL,
              warnings INTEGER NOT NULL,
              processing_time_ms INTEGER NOT NULL,
              incomplete INTEGER NOT NULL DEFAULT 0,
              detailed_results_json TEXT NOT NULL,
              escopos_afetados_json TEXT NOT NULL,
              executed_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_import_run_executed_at
              ON import_run(executed_at DESC);
            "#,
        )?;
        Ok(())
    }

    fn map_snapshot(row: &Row) -> rusqlite::Result<FuncionarioSnapshot> {
        let data_raw: String = row.get(3)?;
        let estado_raw: Option<String> = row.get(6)?;
        Ok(FuncionarioSnapshot {
            funcionario_id: row.get(0)?,
            nome_completo: row.get(1)?,
            cpf: row.get(2)?,
            data_nascimento: NaiveDate::parse_from_str(&data_raw, "%Y-%m-%d")
                .unwrap_or_default(),
            cargo: row.get(4)?,
            salario_mensal: row.get(5)?,
            estado_civil: estado_raw.as_deref().and_then(EstadoCivil::parse),
            email: row.get(7)?,
            telefone: row.get(8)?,
            empresa_cnpj: row.get(9)?,
        })
    }

    fn insert_funcionario_tx(
        tx: &Transaction,
        funcionario: &Funcionario,
    ) -> RepositoryResult<()> {
        tx.execute(
            r#"
            INSERT INTO funcionario (
                funcionario_id, nome_completo, cpf, data_nascimento,
                cargo, salario_mensal, estado_civil, email, telefone,
                empresa_cnpj, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                funcionario.funcionario_id,
                funcionario.nome_completo,
                funcionario.cpf,
                funcionario.data_nascimento.to_string(),
                funcionario.cargo,
                funcionario.salario_mensal,
                funcionario.estado_civil.map(|e| e.to_string()),
                funcionario.email,
                funcionario.telefone,
                funcionario.empresa_cnpj,
                funcionario.created_at.to_rfc3339(),
                funcionario.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn map_import_run(row: &Row) -> rusqlite::Result<ImportRunSummary> {
        let detailed_raw: String = row.get(12)?;
        let escopos_raw: String = row.get(13)?;
        let executed_raw: String = row.get(14)?;
        Ok(ImportRunSummary {
            run_id: row.get(0)?,
            empresa_cnpj: row.get(1)?,
            file_name: row.get(2)?,
            total_rows: row.get::<_, i64>(3)? as usize,
            successful_imports: row.get::<_, i64>(4)? as usize,
            updated_records: row.get::<_, i64>(5)? as usize,
            failed_imports: row.get::<_, i64>(6)? as usize,
            ignored_errors: row.get::<_, i64>(7)? as usize,
            duplicates_handled: row.get::<_, i64>(8)? as usize,
            warnings: row.get::<_, i64>(9)? as usize,
            processing_time: std::time::Duration::from_millis(row.get::<_, i64>(10)? as u64),
            incomplete: row.get::<_, i64>(11)? != 0,
            detailed_results: serde_json::from_str::<DetailedResults>(&detailed_raw)
                .unwrap_or_default(),
            escopos_afetados: serde_json::from_str::<BTreeSet<EscopoAfetado>>(&escopos_raw)
                .unwrap_or_default(),
            executed_at: chrono::DateTime::parse_from_rfc3339(&executed_raw)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }
}

#[async_trait]
impl DuplicateLookup for FuncionarioRepositoryImpl {
    /// Busca o registro existente para (cpf, empresa)
    async fn find_by_cpf_in_scope(
        &self,
        cpf: &str,
        empresa_cnpj: &str,
    ) -> Result<Option<FuncionarioSnapshot>, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("Falha ao adquirir o lock: {}", e))?;

        let mut stmt = conn.prepare(
            r#"
            SELECT funcionario_id, nome_completo, cpf, data_nascimento,
                   cargo, salario_mensal, estado_civil, email, telefone,
                   empresa_cnpj
            FROM funcionario
            WHERE cpf = ?1 AND empresa_cnpj = ?2
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )?;

        let result = stmt.query_row(params![cpf, empresa_cnpj], Self::map_snapshot);

        match result {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }
}

#[async_trait]
impl FuncionarioRepository for FuncionarioRepositoryImpl {
    /// Insere em lote os registros decididos como "importar" (transacional)
    async fn batch_insert_funcionarios(
        &self,
        funcionarios: Vec<Funcionario>,
    ) -> Result<usize, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("Falha ao adquirir o lock: {}", e))?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for funcionario in &funcionarios {
            Self::insert_funcionario_tx(&tx, funcionario)?;
            count += 1;
        }

        tx.commit()?;
        Ok(count)
    }

    /// Aplica em lote as atualizações decididas (transacional)
    async fn batch_update_funcionarios(
        &self,
        updates: Vec<FuncionarioUpdate>,
    ) -> Result<usize, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("Falha ao adquirir o lock: {}", e))?;
        let tx = conn.unchecked_transaction()?;

        let mut stmt = tx.prepare(
            r#"
            UPDATE funcionario
            SET nome_completo = ?2,
                data_nascimento = ?3,
                cargo = ?4,
                salario_mensal = ?5,
                estado_civil = ?6,
                email = ?7,
                telefone = ?8,
                updated_at = ?9
            WHERE funcionario_id = ?1
            "#,
        )?;

        let mut count = 0;
        for update in &updates {
            let novo = &update.novo;
            stmt.execute(params![
                update.funcionario_id,
                novo.nome_completo,
                novo.data_nascimento.to_string(),
                novo.cargo,
                novo.salario_mensal,
                novo.estado_civil.map(|e| e.to_string()),
                novo.email,
                novo.telefone,
                novo.updated_at.to_rfc3339(),
            ])?;
            count += 1;
        }

        // Libera o empréstimo do stmt antes do commit
        drop(stmt);

        tx.commit()?;
        Ok(count)
    }

    /// Registra o resumo da execução como artefato de auditoria
    async fn insert_import_run(
        &self,
        summary: &ImportRunSummary,
    ) -> Result<(), Box<dyn Error>> {
        let detailed_json = serde_json::to_string(&summary.detailed_results)?;
        let escopos_json = serde_json::to_string(&summary.escopos_afetados)?;

        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("Falha ao adquirir o lock: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO import_run (
                run_id, empresa_cnpj, file_name,
                total_rows, successful_imports, updated_records,
                failed_imports, ignored_errors, duplicates_handled,
                warnings, processing_time_ms, incomplete,
                detailed_results_json, escopos_afetados_json, executed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            params![
                summary.run_id,
                summary.empresa_cnpj,
                summary.file_name,
                summary.total_rows as i64,
                summary.successful_imports as i64,
                summary.updated_records as i64,
                summary.failed_imports as i64,
                summary.ignored_errors as i64,
                summary.duplicates_handled as i64,
                summary.warnings as i64,
                summary.processing_time.as_millis() as i64,
                summary.incomplete as i32,
                detailed_json,
                escopos_json,
                summary.executed_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    /// Execuções mais recentes (para a tela de histórico)
    async fn recent_import_runs(
        &self,
        limit: usize,
    ) -> Result<Vec<ImportRunSummary>, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("Falha ao adquirir o lock: {}", e))?;

        let mut stmt = conn.prepare(
            r#"
            SELECT run_id, empresa_cnpj, file_name,
                   total_rows, successful_imports, updated_records,
                   failed_imports, ignored_errors, duplicates_handled,
                   warnings, processing_time_ms, incomplete,
                   detailed_results_json, escopos_afetados_json, executed_at
            FROM import_run
            ORDER BY executed_at DESC
            LIMIT ?1
            "#,
        )?;

        let runs = stmt
            .query_map(params![limit as i64], Self::map_import_run)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(runs)
    }

    /// Total de funcionários persistidos
    async fn count_funcionarios(&self) -> Result<usize, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("Falha ao adquirir o lock: {}", e))?;

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM funcionario", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn funcionario_de_teste(id: &str, cpf: &str) -> Funcionario {
        Funcionario {
            funcionario_id: id.to_string(),
            nome_completo: "Maria Silva".to_string(),
            cpf: cpf.to_string(),
            data_nascimento: NaiveDate::from_ymd_opt(1990, 5, 10).unwrap(),
            cargo: "Analista".to_string(),
            salario_mensal: 4500.0,
            estado_civil: Some(EstadoCivil::Casado),
            email: Some("maria@exemplo.com.br".to_string()),
            telefone: None,
            empresa_cnpj: "11222333000181".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_e_find_por_escopo() {
        let repo = FuncionarioRepositoryImpl::in_memory().unwrap();
        let f = funcionario_de_teste("id-1", "52998224725");

        let inseridos = repo.batch_insert_funcionarios(vec![f]).await.unwrap();
        assert_eq!(inseridos, 1);

        let achado = repo
            .find_by_cpf_in_scope("52998224725", "11222333000181")
            .await
            .unwrap();
        assert!(achado.is_some());
        let snapshot = achado.unwrap();
        assert_eq!(snapshot.funcionario_id, "id-1");
        assert_eq!(snapshot.estado_civil, Some(EstadoCivil::Casado));
        assert_eq!(
            snapshot.data_nascimento,
            NaiveDate::from_ymd_opt(1990, 5, 10).unwrap()
        );

        // Mesmo CPF em outra empresa não é duplicata
        let outro_escopo = repo
            .find_by_cpf_in_scope("52998224725", "99888777000166")
            .await
            .unwrap();
        assert!(outro_escopo.is_none());
    }

    #[tokio::test]
    async fn test_batch_update() {
        let repo = FuncionarioRepositoryImpl::in_memory().unwrap();
        let f = funcionario_de_teste("id-1", "52998224725");
        repo.batch_insert_funcionarios(vec![f.clone()]).await.unwrap();

        let mut novo = f;
        novo.cargo = "Coordenadora".to_string();
        novo.salario_mensal = 6200.0;

        let atualizados = repo
            .batch_update_funcionarios(vec![FuncionarioUpdate {
                funcionario_id: "id-1".to_string(),
                novo,
                campos_alterados: vec![],
            }])
            .await
            .unwrap();
        assert_eq!(atualizados, 1);

        let snapshot = repo
            .find_by_cpf_in_scope("52998224725", "11222333000181")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.cargo, "Coordenadora");
        assert_eq!(snapshot.salario_mensal, 6200.0);
        assert_eq!(repo.count_funcionarios().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_import_run_round_trip() {
        let repo = FuncionarioRepositoryImpl::in_memory().unwrap();

        let mut escopos = BTreeSet::new();
        escopos.insert(EscopoAfetado {
            cpf: "52998224725".to_string(),
            empresa_cnpj: "11222333000181".to_string(),
        });

        let summary = ImportRunSummary {
            run_id: "run-1".to_string(),
            empresa_cnpj: "11222333000181".to_string(),
            file_name: Some("funcionarios.csv".to_string()),
            total_rows: 5,
            successful_imports: 3,
            updated_records: 1,
            failed_imports: 1,
            ignored_errors: 0,
            duplicates_handled: 0,
            warnings: 2,
            processing_time: std::time::Duration::from_millis(120),
            incomplete: false,
            detailed_results: DetailedResults::default(),
            escopos_afetados: escopos,
            executed_at: Utc::now(),
        };

        repo.insert_import_run(&summary).await.unwrap();

        let runs = repo.recent_import_runs(10).await.unwrap();
        assert_eq!(runs.len(), 1);
        let lido = &runs[0];
        assert_eq!(lido.run_id, "run-1");
        assert_eq!(lido.total_rows, 5);
        assert!(lido.contagem_consistente());
        assert_eq!(lido.escopos_afetados.len(), 1);
        assert_eq!(lido.processing_time, std::time::Duration::from_millis(120));
    }
}
