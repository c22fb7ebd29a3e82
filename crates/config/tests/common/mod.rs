//! Shared node types for keystone-config integration tests.
//!
//! Models a small service configuration: a database section, an SMTP section
//! and a top-level API token, each carrying deferred secrets.

#![allow(dead_code)]

use keystone_config::{ConfigNode, FieldMut, Node, NodeReader, Secret};

#[derive(Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pool_size: u32,
    pub password: Secret,
}

impl Node for DatabaseConfig {
    fn type_name(&self) -> &'static str {
        Self::NAME
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "host" | "port" | "user" | "pool_size" => Some(FieldMut::Value),
            "password" => Some(FieldMut::Secret(&mut self.password)),
            _ => None,
        }
    }
}

impl ConfigNode for DatabaseConfig {
    const NAME: &'static str = "DatabaseConfig";

    fn bind(reader: &mut NodeReader<'_>) -> Option<Self> {
        let host = reader.field::<String>("host").min_len(1).required();
        let port = reader.field::<u16>("port").min(1).or(5432);
        let user = reader.field::<String>("user").min_len(1).required();
        let pool_size = reader.field::<u32>("pool_size").range(1, 64).or(8);
        let password = reader.secret("password");
        Some(Self {
            host: host?,
            port: port?,
            user: user?,
            pool_size: pool_size?,
            password,
        })
    }
}

#[derive(Debug)]
pub struct SmtpConfig {
    pub server: String,
    pub user: String,
    pub starttls: bool,
    pub timeout: i64,
    pub sender: Option<String>,
    pub password: Secret,
}

impl Node for SmtpConfig {
    fn type_name(&self) -> &'static str {
        Self::NAME
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "server" | "user" | "starttls" | "timeout" | "sender" => Some(FieldMut::Value),
            "password" => Some(FieldMut::Secret(&mut self.password)),
            _ => None,
        }
    }
}

impl ConfigNode for SmtpConfig {
    const NAME: &'static str = "SmtpConfig";

    fn bind(reader: &mut NodeReader<'_>) -> Option<Self> {
        let server = reader.field::<String>("server").min_len(1).required();
        let user = reader.field::<String>("user").min_len(1).required();
        let starttls = reader.field("starttls").or(false);
        let timeout = reader.field::<i64>("timeout").min(1).or(30);
        let sender = reader
            .field::<String>("sender")
            .check(|s| s.contains('@'), "must be an email address")
            .optional();
        let password = reader.secret("password");
        Some(Self {
            server: server?,
            user: user?,
            starttls: starttls?,
            timeout: timeout?,
            sender: sender?,
            password,
        })
    }
}

#[derive(Debug)]
pub struct ServiceConfig {
    pub name: String,
    pub environment: String,
    pub api_token: Secret,
    pub database: DatabaseConfig,
    pub smtp: SmtpConfig,
}

impl Node for ServiceConfig {
    fn type_name(&self) -> &'static str {
        Self::NAME
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "name" | "environment" => Some(FieldMut::Value),
            "api_token" => Some(FieldMut::Secret(&mut self.api_token)),
            "database" => Some(FieldMut::Node(&mut self.database)),
            "smtp" => Some(FieldMut::Node(&mut self.smtp)),
            _ => None,
        }
    }
}

impl ConfigNode for ServiceConfig {
    const NAME: &'static str = "ServiceConfig";

    fn bind(reader: &mut NodeReader<'_>) -> Option<Self> {
        let name = reader.field::<String>("name").min_len(1).required();
        let environment = reader
            .field::<String>("environment")
            .one_of(&["development", "staging", "production"])
            .or_else(|| "development".to_string());
        let api_token = reader.secret("api_token");
        let database = reader.node("database");
        let smtp = reader.node("smtp");
        Some(Self {
            name: name?,
            environment: environment?,
            api_token,
            database: database?,
            smtp: smtp?,
        })
    }
}

pub const SERVICE_TOML: &str = r#"
name = "billing"
environment = "staging"

[database]
host = "db.internal"
port = 5433
user = "billing"

[smtp]
server = "smtp.example.com:587"
user = "mailer"
starttls = true
sender = "billing@example.com"
"#;

pub const SERVICE_SECRETS_JSON: &str = r#"{
    "api_token": "tok-123",
    "database": {"password": "db-pass"},
    "smtp": {"password": "smtp-pass"}
}"#;
