#[cfg(test)]
mod tests {
    use indoc::indoc;
    use orm_dialect::{
        Config, DataType, Db, Field, IndexDef, MigrationStep, TableDef, nuodb::NuoDbDialector,
    };
    use orm_dialect_tests::{MockPool, init_logs};
    use std::sync::Arc;
    use time::macros::date;

    #[tokio::test]
    async fn readme() {
        init_logs();
        let pool = MockPool::new()
            .with_scalar("select current_schema", "SHOP")
            .with_scalar("information_schema.tables", 1_i64)
            .with_scalar("information_schema.statistics", 1_i64)
            .with_rows(
                "ordinal_position",
                &["column_name", "data_type", "character_maximum_length"],
                vec![
                    vec!["ID".into(), "BIGINT".into(), None::<i64>.into()],
                    vec!["NAME".into(), "VARCHAR".into(), 80_i64.into()],
                ],
            );
        let db = Db::open(
            NuoDbDialector::open("nuodb://localhost/shop").with_conn(Arc::new(pool.clone())),
            Config::default(),
        )
        .await
        .expect("Could not open the database");

        let products = TableDef::new("products")
            .field(Field::new("id", DataType::Int64).primary_key())
            .field(Field::new("name", DataType::String).size(80).not_null())
            .field(Field::new("launched", DataType::Time).default_value(date!(2020 - 01 - 01)))
            .index(IndexDef::new("", ["name"]));

        let migrator = db.migrator();
        assert_eq!(migrator.current_database().await.unwrap(), "SHOP");
        let steps = migrator
            .auto_migrate(std::slice::from_ref(&products))
            .await
            .expect("Could not migrate");
        assert_eq!(
            steps,
            [MigrationStep::AddColumn {
                table: "products".into(),
                field: products.fields[2].clone(),
            }]
        );
        assert_eq!(
            pool.statements().last().map(String::as_str),
            Some(r#"ALTER TABLE "products" ADD "launched" timestamp DEFAULT '2020-01-01'"#)
        );

        let tx = db.begin().await.expect("Could not begin");
        tx.exec(
            r#"INSERT INTO "products" ("id", "name") VALUES (?, ?)"#,
            &[1_i64.into(), "Lamp".into()],
        )
        .await
        .expect("Could not insert");
        tx.save_point("before_update").await.expect("Could not create the savepoint");
        tx.rollback_to("before_update")
            .await
            .expect("Could not roll back to the savepoint");
        tx.commit().await.expect("Could not commit");
        assert_eq!(
            pool.statements()[pool.statements().len() - 5..].join("\n"),
            indoc! {r#"
                BEGIN
                INSERT INTO "products" ("id", "name") VALUES (?, ?)
                SAVEPOINT before_update
                ROLLBACK TO SAVEPOINT before_update
                COMMIT
            "#}
            .trim()
        );
    }
}
