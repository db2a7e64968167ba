use crate::schema::TableSchema;

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let pk = if col.auto_increment {
            " PRIMARY KEY AUTOINCREMENT"
        } else {
            ""
        };
        let null_constraint = if !col.nullable && !col.auto_increment {
            " NOT NULL"
        } else {
            ""
        };

        columns.push(format!(
            "    {} {}{}{}",
            col.name,
            col.col_type.sql_type(),
            pk,
            null_constraint
        ));
    }

    if !schema.primary_key.is_empty() {
        columns.push(format!("    PRIMARY KEY ({})", schema.primary_key.join(", ")));
    }

    // Add foreign key constraints
    for fk in schema.foreign_keys {
        let on_delete = if fk.on_delete_cascade {
            " ON DELETE CASCADE"
        } else {
            ""
        };
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({}){}",
            fk.column, fk.references_table, fk.references_column, on_delete
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate DROP TABLE SQL for a table schema
pub fn generate_drop_table(schema: &TableSchema) -> String {
    format!("DROP TABLE IF EXISTS {}", schema.name)
}

/// Generate CREATE INDEX statements for a table schema
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .indexes
        .iter()
        .map(|index| {
            let unique = if index.unique { "UNIQUE " } else { "" };
            format!(
                "CREATE {}INDEX {} ON {} ({})",
                unique,
                index.name,
                schema.name,
                index.columns.join(", ")
            )
        })
        .collect()
}

/// Generate INSERT SQL with positional placeholders for all non-generated columns
pub fn generate_insert(schema: &TableSchema) -> String {
    let columns = schema.insert_columns();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.name,
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Full DDL script for the given tables, statements separated by `;`
pub fn generate_schema_script(schemas: &[&TableSchema]) -> String {
    let mut statements = Vec::new();
    for schema in schemas {
        statements.push(generate_create_table(schema));
        statements.extend(generate_indexes(schema));
    }
    statements
        .iter()
        .map(|s| format!("{};\n", s))
        .collect::<Vec<_>>()
        .join("\n")
}
