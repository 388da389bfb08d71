// ==========================================
// Gestão de Funcionários - Camada de importação
// ==========================================
// Pipeline: leitura → mapeamento de colunas → validação por campo →
// classificação de duplicidade → resolução de política → agregação
// Suporte de arquivo: Excel, CSV
// ==========================================

// Declaração dos módulos
pub mod aggregator;
pub mod column_mapper;
pub mod cpf;
pub mod duplicate_classifier;
pub mod error;
pub mod field_validator;
pub mod file_parser;
pub mod importer_impl;
pub mod importer_trait;
pub mod resolution;

// Reexporta os tipos centrais
pub use aggregator::ResultAggregator;
pub use column_mapper::{CampoAlvo, ColumnMapper, ColumnMapping};
pub use cpf::{normalizar as normalizar_cpf, validar as validar_cpf, CpfValidacao};
pub use duplicate_classifier::DuplicateClassifier;
pub use error::{ImportError, ImportResult};
pub use field_validator::FieldValidator;
pub use file_parser::{CsvParser, ExcelParser, FileParser, TabelaBruta, UniversalFileParser};
pub use importer_impl::FuncionarioImporterImpl;
pub use importer_trait::{FuncionarioImporter, ImportRequest};
pub use resolution::ResolutionEngine;
