use chrono::Local;
use database::{
    db::{create_connection, database_url},
    sample,
};
use log::{error, info};
use sea_orm::TransactionTrait;
use std::process::ExitCode;

/// Fills an empty, migrated database with the sample university
#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let Some(url) = database_url() else {
        error!("DATABASE_URL must be set");
        return ExitCode::FAILURE;
    };

    let db = match create_connection(&url).await {
        Ok(db) => db,
        Err(err) => {
            error!("Failed to connect to the database: {err}");
            return ExitCode::FAILURE;
        }
    };

    let run = async {
        let txn = db.begin().await?;
        let summary = sample::generate(&txn, Local::now().date_naive()).await?;
        txn.commit().await?;
        Ok::<_, database::error::ServiceError>(summary)
    };

    match run.await {
        Ok(summary) => {
            info!(
                "Created {} faculties, {} departments, {} professors, {} students, {} courses, {} semesters, {} class schedules and {} enrollments",
                summary.faculties,
                summary.departments,
                summary.professors,
                summary.students,
                summary.courses,
                summary.semesters,
                summary.class_schedules,
                summary.enrollments
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Sample data generation rolled back: {err}");
            ExitCode::FAILURE
        }
    }
}
