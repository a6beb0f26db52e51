use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Writes `content` to `root/relative`, creating parent directories
pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small Nx-style monorepo laid out under apps/ and libs/:
///
/// - `web` (app) -> react, axios ^1.6.0, core
/// - `api` (app) -> express, axios ^0.27.0, utils
/// - `core` (lib) -> utils, lodash (never imported)
/// - `utils` (lib) -> core (cycle with core)
pub fn sample_monorepo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "package.json",
        r#"{"name": "acme", "private": true, "devDependencies": {"typescript": "^5.4.0"}}"#,
    );
    write(
        root,
        "apps/web/package.json",
        r#"{"name": "web", "dependencies": {"react": "^18.2.0", "axios": "^1.6.0", "core": "*"}}"#,
    );
    write(
        root,
        "apps/web/src/main.tsx",
        "import React from 'react';\nimport axios from 'axios';\nimport { format } from 'core';\n",
    );
    write(
        root,
        "apps/api/package.json",
        r#"{"name": "api", "dependencies": {"express": "^4.19.0", "axios": "^0.27.0", "utils": "*"}}"#,
    );
    write(
        root,
        "apps/api/src/server.ts",
        "import express from 'express';\nconst axios = require('axios');\nimport { z } from 'zod';\nimport { join } from 'node:path';\n",
    );
    write(
        root,
        "libs/core/package.json",
        r#"{"name": "core", "dependencies": {"utils": "*", "lodash": "^4.17.21"}}"#,
    );
    write(root, "libs/core/src/index.ts", "export * from 'utils';\n");
    write(
        root,
        "libs/utils/package.json",
        r#"{"name": "utils", "dependencies": {"core": "*"}}"#,
    );
    write(root, "libs/utils/src/index.ts", "import { x } from 'core';\n");

    dir
}
