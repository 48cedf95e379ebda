/// Number of `;`-separated fields a data row needs to be accepted:
/// `Atividade;Produto;Categoria;Modulo;DataInicio;DataFim;<unused>;Ordem;Visivel`
pub const MIN_FIELDS: usize = 9;

/// Value of the `Visivel` column that keeps a row in the loaded set.
pub const VISIBLE_MARKER: &str = "S";

/// Phrase (matched case-insensitively) that marks an academic period record.
pub const DEFAULT_PERIOD_MARKER: &str = "período letivo";

/// Legacy single-byte encoding the feed is exported in.
pub const DEFAULT_ENCODING: &str = "windows-1252";

/// Feed location used when nothing is configured.
pub const DEFAULT_SOURCE: &str = "calendario.csv";
