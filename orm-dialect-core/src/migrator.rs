use crate::{
    Db, DefaultValue, Dialector, Error, Field, IndexDef, Result, RowLabeled, Statement, TableDef,
    Value,
};
use futures::{TryStreamExt, future::BoxFuture};
use std::{borrow::Cow, slice};

/// Column as found in the live schema.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ColumnType {
    pub name: String,
    /// Type name as reported by the engine.
    pub data_type: String,
    /// Character length, when the engine reports one.
    pub length: Option<i64>,
    pub nullable: bool,
    pub default: Option<String>,
}

impl ColumnType {
    /// Decode one row of the column introspection query.
    ///
    /// Non textual values are rendered as SQL literals by `dialector`.
    pub fn from_row(row: &RowLabeled, dialector: &dyn Dialector) -> Result<Self> {
        let text = |name: &str| {
            row.get_column(name).and_then(|v| match v {
                Value::Varchar(Some(v)) => Some(v.clone()),
                v if v.is_null() => None,
                v => Some(dialector.explain("?", slice::from_ref(v))),
            })
        };
        let Some(name) = text("column_name") else {
            return Err(Error::msg(format!(
                "Column introspection row without `column_name`: {:?}",
                row
            )));
        };
        Ok(Self {
            name,
            data_type: text("data_type").unwrap_or_default(),
            length: row
                .get_column("character_maximum_length")
                .and_then(Value::as_i64),
            nullable: match row.get_column("is_nullable") {
                Some(Value::Boolean(Some(v))) => *v,
                Some(Value::Varchar(Some(v))) => v.eq_ignore_ascii_case("yes"),
                _ => true,
            },
            default: text("column_default"),
        })
    }
}

/// One DDL change.
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationStep {
    CreateTable(TableDef),
    DropTable(Cow<'static, str>),
    RenameTable {
        from: Cow<'static, str>,
        to: Cow<'static, str>,
    },
    AddColumn {
        table: Cow<'static, str>,
        field: Field,
    },
    AlterColumn {
        table: Cow<'static, str>,
        field: Field,
    },
    DropColumn {
        table: Cow<'static, str>,
        column: Cow<'static, str>,
    },
    RenameColumn {
        table: Cow<'static, str>,
        from: Cow<'static, str>,
        to: Cow<'static, str>,
    },
    CreateIndex {
        table: Cow<'static, str>,
        index: IndexDef,
    },
    DropIndex {
        table: Cow<'static, str>,
        index: Cow<'static, str>,
    },
}

/// Engine specific part of the migrator.
///
/// Only [`MigratorDialect::current_database`] is required, everything else has
/// a default that works on engines exposing `information_schema`.
pub trait MigratorDialect: Send + Sync {
    /// Name of the schema the connection currently works in.
    fn current_database<'a>(&'a self, db: &'a Db) -> BoxFuture<'a, Result<String>>;

    fn has_table_sql(&self) -> &'static str {
        "SELECT count(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ? AND table_type = 'BASE TABLE'"
    }

    fn has_column_sql(&self) -> &'static str {
        "SELECT count(*) FROM information_schema.columns WHERE table_schema = ? AND table_name = ? AND column_name = ?"
    }

    fn has_index_sql(&self) -> &'static str {
        "SELECT count(*) FROM information_schema.statistics WHERE table_schema = ? AND table_name = ? AND index_name = ?"
    }

    /// Must return the labels decoded by [`ColumnType::from_row`].
    fn column_types_sql(&self) -> &'static str {
        "SELECT column_name, data_type, character_maximum_length, is_nullable, column_default FROM information_schema.columns WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position"
    }

    /// Engine spellings mapped to the names the dialector renders.
    fn type_aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("bool", "boolean"),
            ("int", "integer"),
            ("int4", "integer"),
            ("int8", "bigint"),
            ("double precision", "double"),
            ("float8", "double"),
            ("character varying", "varchar"),
            ("string", "text"),
            ("clob", "text"),
            ("datetime", "timestamp"),
            ("binary large object", "blob"),
            ("bytea", "blob"),
        ]
    }

    fn write_alter_column(
        &self,
        statement: &mut Statement,
        table: &str,
        column: &str,
        data_type: &str,
    ) {
        statement
            .write_str("ALTER TABLE ")
            .write_quoted(table)
            .write_str(" ALTER COLUMN ")
            .write_quoted(column)
            .write_str(" TYPE ")
            .write_str(data_type);
    }

    fn write_drop_index(&self, statement: &mut Statement, _table: &str, index: &str) {
        statement.write_str("DROP INDEX ").write_quoted(index);
    }
}

/// Generic schema migrator: introspects the live schema, diffs it against the
/// desired tables and emits the DDL through the dialector.
pub struct Migrator<'a> {
    db: &'a Db,
    dialect: Box<dyn MigratorDialect + 'a>,
}

impl<'a> Migrator<'a> {
    pub fn new(db: &'a Db, dialect: impl MigratorDialect + 'a) -> Self {
        Self {
            db,
            dialect: Box::new(dialect),
        }
    }

    pub fn db(&self) -> &'a Db {
        self.db
    }

    pub async fn current_database(&self) -> Result<String> {
        self.dialect.current_database(self.db).await
    }

    fn table_name(&self, table: &str) -> String {
        self.db.naming_strategy().table_name(table)
    }

    fn column_name(&self, table: &str, column: &str) -> String {
        self.db.naming_strategy().column_name(table, column)
    }

    fn index_name(&self, table: &str, index: &IndexDef) -> String {
        if !index.name.is_empty() {
            return index.name.to_string();
        }
        self.db
            .naming_strategy()
            .index_name(table, &index.columns.join("_"))
    }

    async fn count(&self, sql: &str, vars: &[Value]) -> Result<bool> {
        let value = self.db.raw_scalar(sql, vars).await?;
        Ok(match value {
            Some(Value::UInt64(Some(v))) => v > 0,
            Some(v) => v.as_i64().is_some_and(|v| v > 0),
            None => false,
        })
    }

    pub async fn has_table(&self, table: &str) -> Result<bool> {
        let schema = self.current_database().await?;
        self.count(
            self.dialect.has_table_sql(),
            &[Value::from(schema), self.table_name(table).into()],
        )
        .await
    }

    pub async fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        let schema = self.current_database().await?;
        self.count(
            self.dialect.has_column_sql(),
            &[
                Value::from(schema),
                self.table_name(table).into(),
                self.column_name(table, column).into(),
            ],
        )
        .await
    }

    pub async fn has_index(&self, table: &str, index: &str) -> Result<bool> {
        let schema = self.current_database().await?;
        self.count(
            self.dialect.has_index_sql(),
            &[
                Value::from(schema),
                self.table_name(table).into(),
                index.into(),
            ],
        )
        .await
    }

    /// Columns of `table` in the live schema, in declaration order.
    pub async fn column_types(&self, table: &str) -> Result<Vec<ColumnType>> {
        let schema = self.current_database().await?;
        let vars: [Value; 2] = [schema.into(), self.table_name(table).into()];
        let dialector = self.db.dialector();
        self.db
            .raw(self.dialect.column_types_sql(), &vars)
            .and_then(move |row| async move { ColumnType::from_row(&row, dialector) })
            .try_collect()
            .await
    }

    /// Type, constraints and default of a column as written in `CREATE TABLE` and `ADD`.
    pub fn full_data_type_of(&self, field: &Field) -> String {
        let dialector = self.db.dialector();
        let mut out = dialector.data_type_of(field);
        if field.not_null {
            out.push_str(" NOT NULL");
        }
        if field.unique && !field.primary_key {
            out.push_str(" UNIQUE");
        }
        match &field.default {
            Some(DefaultValue::Expression(v)) if !v.is_empty() => {
                out.push_str(" DEFAULT ");
                out.push_str(v);
            }
            Some(DefaultValue::Value(..)) => {
                let default = dialector.default_value_of(field);
                if !default.is_empty() {
                    out.push_str(" DEFAULT ");
                    // DDL does not take parameters
                    out.push_str(&dialector.explain(&default.sql, &default.vars));
                }
            }
            _ => {}
        }
        out
    }

    fn same_type(&self, column: &ColumnType, rendered: &str) -> bool {
        let normalize = |v: &str| {
            let v = v.trim().to_ascii_lowercase();
            let (base, args) = match v.find('(') {
                Some(i) => (v[..i].trim().to_owned(), Some(v[i..].replace(' ', ""))),
                None => (v.clone(), None),
            };
            let base = self
                .dialect
                .type_aliases()
                .iter()
                .find_map(|(alias, name)| (*alias == base).then(|| name.to_string()))
                .unwrap_or(base);
            (base, args)
        };
        let (live, live_args) = normalize(&column.data_type);
        let (wanted, wanted_args) = normalize(rendered);
        if live != wanted {
            return false;
        }
        let live_args = live_args.or_else(|| column.length.map(|v| format!("({})", v)));
        match (live_args, wanted_args) {
            (Some(l), Some(w)) => l == w,
            _ => true,
        }
    }

    /// Diff the desired tables against the live schema.
    pub async fn plan(&self, tables: &[TableDef]) -> Result<Vec<MigrationStep>> {
        let mut steps = Vec::new();
        for table in tables {
            if !self.has_table(&table.name).await? {
                steps.push(MigrationStep::CreateTable(table.clone()));
                steps.extend(table.indexes.iter().map(|index| MigrationStep::CreateIndex {
                    table: table.name.clone(),
                    index: index.clone(),
                }));
                continue;
            }
            let columns = self.column_types(&table.name).await?;
            for field in &table.fields {
                let name = self.column_name(&table.name, &field.name);
                match columns.iter().find(|c| c.name.eq_ignore_ascii_case(&name)) {
                    None => steps.push(MigrationStep::AddColumn {
                        table: table.name.clone(),
                        field: field.clone(),
                    }),
                    Some(column) => {
                        let rendered = self.db.dialector().data_type_of(field);
                        if !self.same_type(column, &rendered) {
                            log::debug!(
                                "Column `{}`.`{}` is `{}`, wanted `{}`",
                                table.name,
                                name,
                                column.data_type,
                                rendered
                            );
                            steps.push(MigrationStep::AlterColumn {
                                table: table.name.clone(),
                                field: field.clone(),
                            });
                        }
                    }
                }
            }
            for index in &table.indexes {
                let name = self.index_name(&table.name, index);
                if !self.has_index(&table.name, &name).await? {
                    steps.push(MigrationStep::CreateIndex {
                        table: table.name.clone(),
                        index: index.clone(),
                    });
                }
            }
        }
        Ok(steps)
    }

    /// Plan and apply in order, stopping at the first failure. Returns the applied steps.
    pub async fn auto_migrate(&self, tables: &[TableDef]) -> Result<Vec<MigrationStep>> {
        let steps = self.plan(tables).await?;
        for step in &steps {
            self.apply(step).await?;
        }
        Ok(steps)
    }

    /// DDL statement of a step.
    pub fn render(&self, step: &MigrationStep) -> Statement<'a> {
        let mut statement = self.db.statement();
        match step {
            MigrationStep::CreateTable(table) => {
                let name = self.table_name(&table.name);
                statement
                    .write_str("CREATE TABLE ")
                    .write_quoted(&name)
                    .write_str(" (\n");
                let mut first = true;
                for field in &table.fields {
                    if !first {
                        statement.write_str(",\n");
                    }
                    first = false;
                    statement
                        .write_quoted(&self.column_name(&table.name, &field.name))
                        .write_char(' ')
                        .write_str(&self.full_data_type_of(field));
                }
                let primary_key = table
                    .primary_key()
                    .map(|f| self.column_name(&table.name, &f.name))
                    .collect::<Vec<_>>();
                if !primary_key.is_empty() {
                    if !first {
                        statement.write_str(",\n");
                    }
                    statement
                        .write_str("PRIMARY KEY (")
                        .write_quoted_list(&primary_key)
                        .write_char(')');
                }
                statement.write_str("\n)");
            }
            MigrationStep::DropTable(table) => {
                statement
                    .write_str("DROP TABLE IF EXISTS ")
                    .write_quoted(&self.table_name(table));
            }
            MigrationStep::RenameTable { from, to } => {
                statement
                    .write_str("ALTER TABLE ")
                    .write_quoted(&self.table_name(from))
                    .write_str(" RENAME TO ")
                    .write_quoted(&self.table_name(to));
            }
            MigrationStep::AddColumn { table, field } => {
                statement
                    .write_str("ALTER TABLE ")
                    .write_quoted(&self.table_name(table))
                    .write_str(" ADD ")
                    .write_quoted(&self.column_name(table, &field.name))
                    .write_char(' ')
                    .write_str(&self.full_data_type_of(field));
            }
            MigrationStep::AlterColumn { table, field } => {
                let data_type = self.db.dialector().data_type_of(field);
                self.dialect.write_alter_column(
                    &mut statement,
                    &self.table_name(table),
                    &self.column_name(table, &field.name),
                    &data_type,
                );
            }
            MigrationStep::DropColumn { table, column } => {
                statement
                    .write_str("ALTER TABLE ")
                    .write_quoted(&self.table_name(table))
                    .write_str(" DROP COLUMN ")
                    .write_quoted(&self.column_name(table, column));
            }
            MigrationStep::RenameColumn { table, from, to } => {
                statement
                    .write_str("ALTER TABLE ")
                    .write_quoted(&self.table_name(table))
                    .write_str(" RENAME COLUMN ")
                    .write_quoted(&self.column_name(table, from))
                    .write_str(" TO ")
                    .write_quoted(&self.column_name(table, to));
            }
            MigrationStep::CreateIndex { table, index } => {
                let columns = index
                    .columns
                    .iter()
                    .map(|c| self.column_name(table, c))
                    .collect::<Vec<_>>();
                statement.write_str(if index.unique {
                    "CREATE UNIQUE INDEX "
                } else {
                    "CREATE INDEX "
                });
                statement
                    .write_quoted(&self.index_name(table, index))
                    .write_str(" ON ")
                    .write_quoted(&self.table_name(table))
                    .write_str(" (")
                    .write_quoted_list(&columns)
                    .write_char(')');
            }
            MigrationStep::DropIndex { table, index } => {
                self.dialect
                    .write_drop_index(&mut statement, &self.table_name(table), index);
            }
        }
        statement
    }

    pub async fn apply(&self, step: &MigrationStep) -> Result<()> {
        let statement = self.render(step);
        self.db.exec_statement(&statement).await?;
        Ok(())
    }

    pub async fn create_table(&self, table: &TableDef) -> Result<()> {
        self.apply(&MigrationStep::CreateTable(table.clone())).await?;
        for index in &table.indexes {
            self.create_index(&table.name, index).await?;
        }
        Ok(())
    }

    pub async fn drop_table(&self, table: &str) -> Result<()> {
        self.apply(&MigrationStep::DropTable(table.to_owned().into()))
            .await
    }

    pub async fn rename_table(&self, from: &str, to: &str) -> Result<()> {
        self.apply(&MigrationStep::RenameTable {
            from: from.to_owned().into(),
            to: to.to_owned().into(),
        })
        .await
    }

    pub async fn add_column(&self, table: &str, field: &Field) -> Result<()> {
        self.apply(&MigrationStep::AddColumn {
            table: table.to_owned().into(),
            field: field.clone(),
        })
        .await
    }

    pub async fn alter_column(&self, table: &str, field: &Field) -> Result<()> {
        self.apply(&MigrationStep::AlterColumn {
            table: table.to_owned().into(),
            field: field.clone(),
        })
        .await
    }

    pub async fn drop_column(&self, table: &str, column: &str) -> Result<()> {
        self.apply(&MigrationStep::DropColumn {
            table: table.to_owned().into(),
            column: column.to_owned().into(),
        })
        .await
    }

    pub async fn rename_column(&self, table: &str, from: &str, to: &str) -> Result<()> {
        self.apply(&MigrationStep::RenameColumn {
            table: table.to_owned().into(),
            from: from.to_owned().into(),
            to: to.to_owned().into(),
        })
        .await
    }

    pub async fn create_index(&self, table: &str, index: &IndexDef) -> Result<()> {
        self.apply(&MigrationStep::CreateIndex {
            table: table.to_owned().into(),
            index: index.clone(),
        })
        .await
    }

    pub async fn drop_index(&self, table: &str, index: &str) -> Result<()> {
        self.apply(&MigrationStep::DropIndex {
            table: table.to_owned().into(),
            index: index.to_owned().into(),
        })
        .await
    }
}
