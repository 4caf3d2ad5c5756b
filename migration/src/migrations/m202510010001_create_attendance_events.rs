use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010001_create_attendance_events"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(Alias::new("attendance_events"))
            .if_not_exists()
            .col(
                ColumnDef::new(Alias::new("id"))
                    .string_len(36)
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Alias::new("event_name")).string().not_null())
            .col(ColumnDef::new(Alias::new("event_date")).date().not_null())
            .col(
                ColumnDef::new(Alias::new("event_type"))
                    .string()
                    .not_null()
                    .default("general"),
            );

        // one rendered QR image and one spreadsheet destination per segment
        for segment in ["senior", "umum", "panitia"] {
            table
                .col(ColumnDef::new(Alias::new(format!("qr_code_{segment}"))).text().null())
                .col(
                    ColumnDef::new(Alias::new(format!("spreadsheet_url_{segment}")))
                        .string()
                        .null(),
                );
        }

        table
            .col(
                ColumnDef::new(Alias::new("is_active"))
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .col(
                ColumnDef::new(Alias::new("created_at"))
                    .timestamp()
                    .not_null()
                    .default(Expr::cust("CURRENT_TIMESTAMP")),
            )
            .col(
                ColumnDef::new(Alias::new("updated_at"))
                    .timestamp()
                    .not_null()
                    .default(Expr::cust("CURRENT_TIMESTAMP")),
            );
        manager.create_table(table).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_events_date")
                    .table(Alias::new("attendance_events"))
                    .col(Alias::new("event_date"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("attendance_events"))
                    .to_owned(),
            )
            .await
    }
}
