//! Built-in skeletons.
//!
//! Six bodies ship inside the binary, one per `<kind>.<flavor>` id. They are
//! the starting point of every [`InMemoryStore`](crate::InMemoryStore);
//! override files loaded by [`crate::template_loader`] replace them by id.
//!
//! # Placeholders
//!
//! `{{NAME}}`, `{{CLASS_NAME}}`, `{{PLURAL_NAME}}`, `{{TABLE_NAME}}`,
//! `{{CLASS_PLURAL}}`, `{{VERSION}}`, `{{AUTH_IMPORT}}`, `{{AUTH_MIDDLEWARE}}`.
//! JavaScript template literals (`${...}`) and OpenAPI path parameters
//! (`{id}`) pass through untouched.

use bvbuilder_core::domain::{ArtifactKind, Flavor, Template, TemplateId};

/// All built-in templates, in generation order per flavor.
pub fn all_templates() -> Vec<Template> {
    TemplateId::all()
        .map(|id| Template::builtin(id, body(id)))
        .collect()
}

/// Body of the built-in skeleton for `id`.
pub fn body(id: TemplateId) -> &'static str {
    match (id.kind, id.flavor) {
        (ArtifactKind::Model, Flavor::Basic) => MODEL_BASIC,
        (ArtifactKind::Model, Flavor::Crud) => MODEL_CRUD,
        (ArtifactKind::Controller, Flavor::Basic) => CONTROLLER_BASIC,
        (ArtifactKind::Controller, Flavor::Crud) => CONTROLLER_CRUD,
        (ArtifactKind::Route, Flavor::Basic) => ROUTE_BASIC,
        (ArtifactKind::Route, Flavor::Crud) => ROUTE_CRUD,
    }
}

// ── Models ───────────────────────────────────────────────────────────────────

const MODEL_BASIC: &str = r#"const db = require('../../config/db');

const {{CLASS_NAME}} = {
    findAllPaging: async ({ search, limit, offset }) => {
        let sql = "SELECT * FROM {{TABLE_NAME}} WHERE 1=1";
        const params = [];
        if (search) { sql += " AND name LIKE ?"; params.push(`%${search}%`); }
        sql += " LIMIT ? OFFSET ?";
        params.push(limit, offset);
        const [rows] = await db.query(sql, params);
        return rows;
    },
    countAll: async ({ search }) => {
        let sql = "SELECT COUNT(*) as total FROM {{TABLE_NAME}} WHERE 1=1";
        const params = [];
        if (search) { sql += " AND name LIKE ?"; params.push(`%${search}%`); }
        const [[{ total }]] = await db.query(sql, params);
        return total;
    },
    findById: async (id) => {
        const [rows] = await db.query("SELECT * FROM {{TABLE_NAME}} WHERE id = ?", [id]);
        if (!rows.length) return null;
        return rows[0];
    }
};

module.exports = {{CLASS_NAME}};
"#;

const MODEL_CRUD: &str = r#"const db = require('../../config/db');

const {{CLASS_NAME}} = {
    findAllPaging: async ({ search, limit, offset }) => {
        let sql = "SELECT * FROM {{TABLE_NAME}} WHERE 1=1";
        const params = [];
        if (search) {
            sql += " AND name LIKE ?";
            params.push(`%${search}%`);
        }
        sql += " LIMIT ? OFFSET ?";
        params.push(limit, offset);
        const [rows] = await db.query(sql, params);
        return rows;
    },

    countAll: async ({ search }) => {
        let sql = "SELECT COUNT(*) as total FROM {{TABLE_NAME}} WHERE 1=1";
        const params = [];
        if (search) {
            sql += " AND name LIKE ?";
            params.push(`%${search}%`);
        }
        const [[{ total }]] = await db.query(sql, params);
        return total;
    },

    findById: async (id) => {
        const [rows] = await db.query("SELECT * FROM {{TABLE_NAME}} WHERE id = ?", [id]);
        return rows[0] || null;
    },

    create: async (data) => {
        const [result] = await db.query("INSERT INTO {{TABLE_NAME}} SET ?", [data]);
        return result.insertId;
    },

    update: async (id, data) => {
        await db.query("UPDATE {{TABLE_NAME}} SET ? WHERE id = ?", [data, id]);
        return true;
    },

    delete: async (id) => {
        const [result] = await db.query("DELETE FROM {{TABLE_NAME}} WHERE id = ?", [id]);
        return result.affectedRows > 0;
    }
};

module.exports = {{CLASS_NAME}};
"#;

// ── Controllers ──────────────────────────────────────────────────────────────

const CONTROLLER_BASIC: &str = r#"// Handlers for /api/{{VERSION}}/{{TABLE_NAME}}
const {{CLASS_NAME}} = require('../models/{{NAME}}Model');

exports.getAll{{CLASS_PLURAL}} = async (req, res) => {
    try {
        const page = parseInt(req.query.page) || 1;
        const limit = parseInt(req.query.limit) || 10;
        const offset = (page - 1) * limit;
        const search = req.query.search || '';

        const [rows, total] = await Promise.all([
            {{CLASS_NAME}}.findAllPaging({ limit, offset, search }),
            {{CLASS_NAME}}.countAll({ search })
        ]);

        res.status(200).json({
            status: "success",
            total_records: total,
            data: rows
        });
    } catch (error) {
        res.status(500).json({ status: "error", message: error.message });
    }
};

exports.get{{CLASS_NAME}}ById = async (req, res) => {
    const { id } = req.params;
    try {
        const item = await {{CLASS_NAME}}.findById(id);
        if (!item) return res.status(404).json({ message: "{{CLASS_NAME}} not found" });

        res.status(200).json({ status: "success", data: item });
    } catch (error) {
        res.status(500).json({ status: "error", message: error.message });
    }
};
"#;

const CONTROLLER_CRUD: &str = r#"// Handlers for /api/{{VERSION}}/{{TABLE_NAME}}
const {{CLASS_NAME}} = require('../models/{{NAME}}Model');

exports.getAll = async (req, res) => {
    try {
        const page = parseInt(req.query.page) || 1;
        const limit = parseInt(req.query.limit) || 10;
        const offset = (page - 1) * limit;
        const search = req.query.search || '';

        const [rows, total] = await Promise.all([
            {{CLASS_NAME}}.findAllPaging({ limit, offset, search }),
            {{CLASS_NAME}}.countAll({ search })
        ]);

        res.status(200).json({
            status: "success",
            total_records: total,
            current_page: page,
            total_pages: Math.ceil(total / limit),
            data: rows
        });
    } catch (error) {
        res.status(500).json({ status: "error", message: error.message });
    }
};

exports.getById = async (req, res) => {
    try {
        const item = await {{CLASS_NAME}}.findById(req.params.id);
        if (!item) return res.status(404).json({ message: "Not found" });
        res.status(200).json({ status: "success", data: item });
    } catch (error) {
        res.status(500).json({ status: "error", message: error.message });
    }
};

exports.create = async (req, res) => {
    try {
        const id = await {{CLASS_NAME}}.create(req.body);
        res.status(201).json({ status: "success", data: { id, ...req.body } });
    } catch (error) {
        res.status(500).json({ status: "error", message: error.message });
    }
};

exports.update = async (req, res) => {
    try {
        await {{CLASS_NAME}}.update(req.params.id, req.body);
        res.status(200).json({ status: "success", message: "Updated" });
    } catch (error) {
        res.status(500).json({ status: "error", message: error.message });
    }
};

exports.delete = async (req, res) => {
    try {
        const deleted = await {{CLASS_NAME}}.delete(req.params.id);
        if (!deleted) {
            return res.status(404).json({ message: "Not found" });
        }
        res.status(204).send();
    } catch (error) {
        res.status(500).json({ status: "error", message: error.message });
    }
};
"#;

// ── Routes ───────────────────────────────────────────────────────────────────

const ROUTE_BASIC: &str = r#"const express = require('express');
const router = express.Router();
const {{NAME}}Controller = require('../controllers/{{NAME}}Controller');
{{AUTH_IMPORT}}

/**
 * @openapi
 * /api/{{VERSION}}/{{PLURAL_NAME}}:
 *   get:
 *     summary: List {{PLURAL_NAME}} with pagination and filters
 *     tags: [{{CLASS_PLURAL}}]
 *     security:
 *       - bearerAuth: []
 *     parameters:
 *       - in: query
 *         name: page
 *         schema:
 *           type: integer
 *           example: 1
 *         description: Page number
 *       - in: query
 *         name: limit
 *         schema:
 *           type: integer
 *           example: 10
 *         description: Items per page
 *       - in: query
 *         name: search
 *         schema:
 *           type: string
 *         description: Filter on name
 *     responses:
 *       200:
 *         description: Paginated list of {{PLURAL_NAME}}
 *         content:
 *           application/json:
 *             schema:
 *               type: object
 *               properties:
 *                 status:
 *                   type: string
 *                   example: success
 *                 total_records:
 *                   type: integer
 *                   example: 100
 *                 data:
 *                   type: array
 *                   items:
 *                     type: object
 *                     properties:
 *                       id:
 *                         type: integer
 *                         example: 1
 *                       name:
 *                         type: string
 *                         example: Name
 *       401:
 *         description: Unauthenticated
 *       500:
 *         description: Server error
 */
router.get('/', {{AUTH_MIDDLEWARE}}{{NAME}}Controller.getAll{{CLASS_PLURAL}});

/**
 * @openapi
 * /api/{{VERSION}}/{{PLURAL_NAME}}/{id}:
 *   get:
 *     summary: Get a {{NAME}} by ID
 *     tags: [{{CLASS_PLURAL}}]
 *     security:
 *       - bearerAuth: []
 *     parameters:
 *       - in: path
 *         name: id
 *         required: true
 *         schema:
 *           type: integer
 *     responses:
 *       200:
 *         description: {{CLASS_NAME}} found
 *       401:
 *         description: Unauthenticated
 *       403:
 *         description: Forbidden
 *       404:
 *         description: {{CLASS_NAME}} not found
 *       500:
 *         description: Server error
 */
router.get('/:id', {{AUTH_MIDDLEWARE}}{{NAME}}Controller.get{{CLASS_NAME}}ById);

module.exports = router;
"#;

const ROUTE_CRUD: &str = r#"const express = require('express');
const router = express.Router();
const {{NAME}}Controller = require('../controllers/{{NAME}}Controller');
{{AUTH_IMPORT}}

/**
 * @openapi
 * components:
 *   schemas:
 *     {{CLASS_NAME}}:
 *       type: object
 *       required:
 *         - name
 *       properties:
 *         id:
 *           type: integer
 *           readOnly: true
 *           example: 3
 *         name:
 *           type: string
 *           example: "Name"
 *         created_at:
 *           type: string
 *           format: date-time
 *           readOnly: true
 *   securitySchemes:
 *     bearerAuth:
 *       type: http
 *       scheme: bearer
 *       bearerFormat: JWT
 */

/**
 * @openapi
 * /api/{{VERSION}}/{{TABLE_NAME}}:
 *   get:
 *     summary: List {{TABLE_NAME}} with pagination and filters
 *     tags: [{{CLASS_PLURAL}}]
 *     security:
 *       - bearerAuth: []
 *     parameters:
 *       - in: query
 *         name: page
 *         schema:
 *           type: integer
 *           example: 1
 *         description: Page number
 *       - in: query
 *         name: limit
 *         schema:
 *           type: integer
 *           example: 10
 *         description: Items per page
 *       - in: query
 *         name: search
 *         schema:
 *           type: string
 *         description: Filter on name
 *     responses:
 *       200:
 *         description: Paginated list of {{TABLE_NAME}}
 *         content:
 *           application/json:
 *             schema:
 *               type: object
 *               properties:
 *                 status:
 *                   type: string
 *                   example: success
 *                 total_records:
 *                   type: integer
 *                   example: 100
 *                 current_page:
 *                   type: integer
 *                   example: 1
 *                 total_pages:
 *                   type: integer
 *                   example: 10
 *                 data:
 *                   type: array
 *                   items:
 *                     $ref: '#/components/schemas/{{CLASS_NAME}}'
 *       401:
 *         description: Unauthenticated
 *       500:
 *         description: Server error
 */
router.get('/', {{AUTH_MIDDLEWARE}}{{NAME}}Controller.getAll);

/**
 * @openapi
 * /api/{{VERSION}}/{{TABLE_NAME}}/{id}:
 *   get:
 *     summary: Get a {{NAME}} by ID
 *     tags: [{{CLASS_PLURAL}}]
 *     security:
 *       - bearerAuth: []
 *     parameters:
 *       - in: path
 *         name: id
 *         required: true
 *         schema:
 *           type: integer
 *     responses:
 *       200:
 *         description: {{CLASS_NAME}} found
 *         content:
 *           application/json:
 *             schema:
 *               $ref: '#/components/schemas/{{CLASS_NAME}}'
 *       401:
 *         description: Unauthenticated
 *       404:
 *         description: {{CLASS_NAME}} not found
 *       500:
 *         description: Server error
 */
router.get('/:id', {{AUTH_MIDDLEWARE}}{{NAME}}Controller.getById);

/**
 * @openapi
 * /api/{{VERSION}}/{{TABLE_NAME}}:
 *   post:
 *     summary: Create a new {{NAME}}
 *     tags: [{{CLASS_PLURAL}}]
 *     security:
 *       - bearerAuth: []
 *     requestBody:
 *       required: true
 *       content:
 *         application/json:
 *           schema:
 *             $ref: '#/components/schemas/{{CLASS_NAME}}'
 *           example:
 *             name: "My new {{NAME}}"
 *     responses:
 *       201:
 *         description: {{CLASS_NAME}} created
 *       400:
 *         description: Invalid request
 *       401:
 *         description: Unauthenticated
 *       500:
 *         description: Server error
 */
router.post('/', {{AUTH_MIDDLEWARE}}{{NAME}}Controller.create);

/**
 * @openapi
 * /api/{{VERSION}}/{{TABLE_NAME}}/{id}:
 *   put:
 *     summary: Update a {{NAME}}
 *     tags: [{{CLASS_PLURAL}}]
 *     security:
 *       - bearerAuth: []
 *     parameters:
 *       - in: path
 *         name: id
 *         required: true
 *         description: Identifier of the {{NAME}}
 *         schema:
 *           type: integer
 *           example: 12
 *     requestBody:
 *       required: true
 *       content:
 *         application/json:
 *           schema:
 *             $ref: '#/components/schemas/{{CLASS_NAME}}'
 *     responses:
 *       200:
 *         description: {{CLASS_NAME}} updated
 *       403:
 *         description: Forbidden
 *       404:
 *         description: {{CLASS_NAME}} not found
 *       500:
 *         description: Server error
 */
router.put('/:id', {{AUTH_MIDDLEWARE}}{{NAME}}Controller.update);

/**
 * @openapi
 * /api/{{VERSION}}/{{TABLE_NAME}}/{id}:
 *   delete:
 *     summary: Delete a {{NAME}}
 *     tags: [{{CLASS_PLURAL}}]
 *     security:
 *       - bearerAuth: []
 *     parameters:
 *       - in: path
 *         name: id
 *         required: true
 *         schema:
 *           type: integer
 *         description: ID of the {{NAME}} to delete
 *     responses:
 *       204:
 *         description: Deleted
 *       404:
 *         description: {{CLASS_NAME}} not found
 *       500:
 *         description: Server error
 */
router.delete('/:id', {{AUTH_MIDDLEWARE}}{{NAME}}Controller.delete);

module.exports = router;
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_builtins_none_empty() {
        let templates = all_templates();
        assert_eq!(templates.len(), 6);
        for template in &templates {
            assert!(template.validate().is_ok(), "{} is empty", template.id);
        }
    }

    #[test]
    fn models_filter_only_under_search_guard() {
        for flavor in Flavor::ALL {
            let model = body(TemplateId::new(ArtifactKind::Model, flavor));
            let guard = model.find("if (search)").unwrap();
            let like = model.find("AND name LIKE ?").unwrap();
            assert!(guard < like);
            assert!(model.contains("WHERE 1=1"));
            assert!(model.contains(" LIMIT ? OFFSET ?"));
        }
    }

    #[test]
    fn every_skeleton_names_the_collection() {
        for id in TemplateId::all() {
            let body = body(id);
            assert!(
                body.contains("{{TABLE_NAME}}") || body.contains("{{PLURAL_NAME}}"),
                "{id}"
            );
        }
    }

    #[test]
    fn crud_delete_maps_affected_rows() {
        let controller = CONTROLLER_CRUD;
        assert!(controller.contains("res.status(204).send()"));
        assert!(controller.contains("if (!deleted)"));
        assert!(MODEL_CRUD.contains("result.affectedRows > 0"));
    }

    #[test]
    fn every_route_registration_carries_auth_slot() {
        for route in [ROUTE_BASIC, ROUTE_CRUD] {
            for line in route.lines().filter(|l| l.starts_with("router.")) {
                assert!(line.contains("{{AUTH_MIDDLEWARE}}"), "missing slot: {line}");
            }
            assert!(route.contains("{{AUTH_IMPORT}}"));
        }
    }

    #[test]
    fn every_registration_is_documented() {
        for route in [ROUTE_BASIC, ROUTE_CRUD] {
            let registrations = route.lines().filter(|l| l.starts_with("router.")).count();
            let paths = route.matches(" * /api/{{VERSION}}/").count();
            assert_eq!(registrations, paths);
        }
    }
}
