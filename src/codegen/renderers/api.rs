//! REST layer: mongoose model, controller and Next.js route handlers.
//!
//! The controller only reproduces the shape of the persistence contract
//! (paginated search, get-by-id, create, update, delete, bulk variants via
//! `Promise.allSettled`, monthly summary); the database itself is external.

use crate::codegen::context::GenerationContext;
use crate::codegen::field_types::{SemanticType, ValidatorKind, WidgetKind};
use crate::codegen::utils::{ts_property_key, ts_string};
use std::fmt::{self, Write};

/// Module that exports the shared database connection helper
const DB_CONNECT_IMPORT: &str = "@/app/api/utils/db";

pub fn render_model(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let mut out = String::new();

    writeln!(out, "// Auto-generated mongoose model for {}", naming.plural_pascal)?;
    writeln!(out, "import mongoose, {{ Schema }} from 'mongoose';")?;
    writeln!(out)?;
    writeln!(out, "const {} = new Schema(", naming.schema_const)?;
    writeln!(out, "  {{")?;

    for field in ctx.fields() {
        let semantic = field.class.semantic_type();
        let mut props = vec![format!("type: {}", semantic.mongoose_type())];

        if field.class.required {
            props.push("required: true".to_string());
        }
        match &field.class.validator {
            ValidatorKind::Email => props.push("match: /^[^\\s@]+@[^\\s@]+\\.[^\\s@]+$/".to_string()),
            ValidatorKind::OneOf(options) => {
                let items: Vec<String> = options.iter().map(|o| ts_string(o)).collect();
                props.push(format!("enum: [{}]", items.join(", ")));
            }
            _ => {}
        }
        match semantic {
            SemanticType::StringList => props.push("default: []".to_string()),
            SemanticType::Boolean => props.push("default: false".to_string()),
            SemanticType::Date if !field.class.required => props.push("default: Date.now".to_string()),
            _ => {}
        }
        if field.widget() == WidgetKind::Text || field.widget() == WidgetKind::Email {
            props.push("trim: true".to_string());
        }

        writeln!(
            out,
            "    {}: {{ {} }},",
            ts_property_key(field.name()),
            props.join(", ")
        )?;
    }

    writeln!(out, "  }},")?;
    writeln!(out, "  {{ timestamps: true }}")?;
    writeln!(out, ");")?;
    writeln!(out)?;

    let searchable: Vec<String> = ctx
        .searchable_fields()
        .map(|f| format!("{}: 'text'", ts_property_key(f.name())))
        .collect();
    if !searchable.is_empty() {
        writeln!(out, "{}.index({{ {} }});", naming.schema_const, searchable.join(", "))?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "export default mongoose.models.{m} || mongoose.model('{m}', {s});",
        m = naming.model_name,
        s = naming.schema_const
    )?;

    Ok(out)
}

pub fn render_controller(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let ep = &naming.endpoints;
    let model = &naming.model_name;
    let mut out = String::new();

    writeln!(out, "// Auto-generated controller for {}", naming.plural_pascal)?;
    writeln!(out, "import {{ NextResponse }} from 'next/server';")?;
    writeln!(out, "import connectDB from '{}';", DB_CONNECT_IMPORT)?;
    writeln!(out, "import {} from './model';", model)?;
    writeln!(out)?;
    writeln!(out, "type Handler = (req: Request) => Promise<Response>;")?;
    writeln!(out)?;
    writeln!(out, "const formatResponse = (data: unknown, message: string, status: number) =>")?;
    writeln!(out, "  NextResponse.json({{ data, message, status }}, {{ status }});")?;
    writeln!(out)?;
    out.push_str(
        r#"const withDB = (handler: Handler): Handler => async (req: Request) => {
  try {
    await connectDB();
    return await handler(req);
  } catch (error: unknown) {
    const err = error as { code?: number; message?: string };
    if (err.code === 11000) {
      return formatResponse(null, 'Duplicate key error', 400);
    }
    return formatResponse(null, err.message ?? 'Internal server error', 500);
  }
};

const escapeRegex = (value: string) => value.replace(/[.*+?^${}()|[\]\\]/g, '\\$&');

const dateRangeFilter = (url: URL) => {
  const startDate = url.searchParams.get('startDate');
  const endDate = url.searchParams.get('endDate');
  if (!startDate || !endDate) return {};
  const end = new Date(endDate);
  end.setHours(23, 59, 59, 999);
  return { createdAt: { $gte: new Date(startDate), $lte: end } };
};

"#,
    );

    // list
    let search_terms: Vec<String> = ctx
        .searchable_fields()
        .map(|f| format!("{{ {}: regex }}", ts_property_key(f.name())))
        .collect();
    writeln!(out, "export const {} = withDB(async (req: Request) => {{", ep.list.name)?;
    writeln!(out, "  const url = new URL(req.url);")?;
    writeln!(out, "  const page = Math.max(parseInt(url.searchParams.get('page') || '1', 10), 1);")?;
    writeln!(out, "  const limit = Math.max(parseInt(url.searchParams.get('limit') || '10', 10), 1);")?;
    writeln!(out, "  const skip = (page - 1) * limit;")?;
    writeln!(out, "  const q = url.searchParams.get('q');")?;
    writeln!(out)?;
    writeln!(out, "  const filter: Record<string, unknown> = {{ ...dateRangeFilter(url) }};")?;
    if search_terms.is_empty() {
        writeln!(out, "  void q;")?;
    } else {
        writeln!(out, "  if (q) {{")?;
        writeln!(out, "    const regex = new RegExp(escapeRegex(q), 'i');")?;
        writeln!(out, "    filter.$or = [{}];", search_terms.join(", "))?;
        writeln!(out, "  }}")?;
    }
    writeln!(out)?;
    writeln!(out, "  const [items, total] = await Promise.all([")?;
    writeln!(out, "    {}.find(filter).sort({{ updatedAt: -1, createdAt: -1 }}).skip(skip).limit(limit),", model)?;
    writeln!(out, "    {}.countDocuments(filter),", model)?;
    writeln!(out, "  ]);")?;
    writeln!(out)?;
    writeln!(
        out,
        "  return formatResponse({{ {}: items, total, page, limit }}, '{} fetched successfully', 200);",
        naming.plural_camel, naming.plural_pascal
    )?;
    writeln!(out, "}});")?;
    writeln!(out)?;

    // get by id
    writeln!(out, "export const {} = withDB(async (req: Request) => {{", ep.get_by_id.name)?;
    writeln!(out, "  const id = new URL(req.url).searchParams.get('id');")?;
    writeln!(out, "  if (!id) return formatResponse(null, 'Id is required', 400);")?;
    writeln!(out, "  const item = await {}.findById(id);", model)?;
    writeln!(out, "  if (!item) return formatResponse(null, '{} not found', 404);", naming.singular_pascal)?;
    writeln!(out, "  return formatResponse(item, '{} fetched successfully', 200);", naming.singular_pascal)?;
    writeln!(out, "}});")?;
    writeln!(out)?;

    // create
    writeln!(out, "export const {} = withDB(async (req: Request) => {{", ep.add.name)?;
    writeln!(out, "  const body = await req.json();")?;
    writeln!(out, "  const created = await {}.create(body);", model)?;
    writeln!(out, "  return formatResponse(created, '{} created successfully', 201);", naming.singular_pascal)?;
    writeln!(out, "}});")?;
    writeln!(out)?;

    // update
    writeln!(out, "export const {} = withDB(async (req: Request) => {{", ep.update.name)?;
    writeln!(out, "  const {{ id, ...updateData }} = await req.json();")?;
    writeln!(out, "  if (!id) return formatResponse(null, 'Id is required', 400);")?;
    writeln!(
        out,
        "  const updated = await {}.findByIdAndUpdate(id, updateData, {{ new: true, runValidators: true }});",
        model
    )?;
    writeln!(out, "  if (!updated) return formatResponse(null, '{} not found', 404);", naming.singular_pascal)?;
    writeln!(out, "  return formatResponse(updated, '{} updated successfully', 200);", naming.singular_pascal)?;
    writeln!(out, "}});")?;
    writeln!(out)?;

    // delete
    writeln!(out, "export const {} = withDB(async (req: Request) => {{", ep.delete.name)?;
    writeln!(out, "  const {{ id }} = await req.json();")?;
    writeln!(out, "  if (!id) return formatResponse(null, 'Id is required', 400);")?;
    writeln!(out, "  const deleted = await {}.findByIdAndDelete(id);", model)?;
    writeln!(out, "  if (!deleted) return formatResponse(null, '{} not found', 404);", naming.singular_pascal)?;
    writeln!(out, "  return formatResponse({{ deletedCount: 1 }}, '{} deleted successfully', 200);", naming.singular_pascal)?;
    writeln!(out, "}});")?;
    writeln!(out)?;

    // bulk update
    writeln!(out, "export const {} = withDB(async (req: Request) => {{", ep.bulk_update.name)?;
    writeln!(out, "  const updates: {{ id: string; updateData: Record<string, unknown> }}[] = await req.json();")?;
    writeln!(out, "  const results = await Promise.allSettled(")?;
    writeln!(
        out,
        "    updates.map(({{ id, updateData }}) => {}.findByIdAndUpdate(id, updateData, {{ new: true, runValidators: true }}))",
        model
    )?;
    writeln!(out, "  );")?;
    writeln!(out, "  const successful = results.filter((r) => r.status === 'fulfilled' && r.value).length;")?;
    writeln!(out, "  const failed = results.length - successful;")?;
    writeln!(out, "  return formatResponse({{ successful, failed }}, 'Bulk update completed', 200);")?;
    writeln!(out, "}});")?;
    writeln!(out)?;

    // bulk delete
    writeln!(out, "export const {} = withDB(async (req: Request) => {{", ep.bulk_delete.name)?;
    writeln!(out, "  const {{ ids }}: {{ ids: string[] }} = await req.json();")?;
    writeln!(out, "  const results = await Promise.allSettled(ids.map((id) => {}.findByIdAndDelete(id)));", model)?;
    writeln!(out, "  const successful = results.filter((r) => r.status === 'fulfilled' && r.value).length;")?;
    writeln!(out, "  const failed = results.length - successful;")?;
    writeln!(out, "  return formatResponse({{ deletedCount: successful, failed }}, 'Bulk delete completed', 200);")?;
    writeln!(out, "}});")?;
    writeln!(out)?;

    // monthly summary
    let numeric: Vec<_> = ctx
        .fields()
        .iter()
        .filter(|f| {
            matches!(
                f.class.semantic_type(),
                SemanticType::Integer | SemanticType::Float
            )
        })
        .collect();
    writeln!(out, "export const {} = withDB(async (req: Request) => {{", ep.summary.name)?;
    writeln!(out, "  const url = new URL(req.url);")?;
    writeln!(out, "  const match = dateRangeFilter(url);")?;
    writeln!(out, "  const monthly = await {}.aggregate([", model)?;
    writeln!(out, "    {{ $match: match }},")?;
    writeln!(out, "    {{")?;
    writeln!(out, "      $group: {{")?;
    writeln!(out, "        _id: {{ year: {{ $year: '$createdAt' }}, month: {{ $month: '$createdAt' }} }},")?;
    writeln!(out, "        count: {{ $sum: 1 }},")?;
    for field in &numeric {
        writeln!(
            out,
            "        {}: {{ $sum: {} }},",
            ts_property_key(&format!("{}Total", field.name())),
            ts_string(&format!("${}", field.name()))
        )?;
    }
    writeln!(out, "      }},")?;
    writeln!(out, "    }},")?;
    writeln!(out, "    {{ $sort: {{ '_id.year': 1, '_id.month': 1 }} }},")?;
    writeln!(out, "  ]);")?;
    writeln!(out, "  const totalCount = monthly.reduce((sum: number, m: {{ count: number }}) => sum + m.count, 0);")?;
    writeln!(
        out,
        "  return formatResponse({{ monthly, totalCount }}, '{} summary fetched successfully', 200);",
        naming.plural_pascal
    )?;
    writeln!(out, "}});")?;

    Ok(out)
}

pub fn render_route(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let ep = &ctx.naming().endpoints;
    let mut out = String::new();

    writeln!(out, "// Auto-generated route handlers for {}", ctx.naming().plural_pascal)?;
    writeln!(out, "import {{")?;
    for endpoint in ep.all() {
        writeln!(out, "  {},", endpoint.name)?;
    }
    writeln!(out, "}} from './controller';")?;
    writeln!(out)?;
    writeln!(out, "const isBulk = (req: Request) => new URL(req.url).searchParams.get('bulk') === 'true';")?;
    writeln!(out)?;
    writeln!(out, "export async function GET(req: Request) {{")?;
    writeln!(out, "  const params = new URL(req.url).searchParams;")?;
    writeln!(out, "  if (params.get('summary') === 'true') return {}(req);", ep.summary.name)?;
    writeln!(out, "  if (params.get('id')) return {}(req);", ep.get_by_id.name)?;
    writeln!(out, "  return {}(req);", ep.list.name)?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "export async function POST(req: Request) {{")?;
    writeln!(out, "  return {}(req);", ep.add.name)?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "export async function PUT(req: Request) {{")?;
    writeln!(out, "  return isBulk(req) ? {}(req) : {}(req);", ep.bulk_update.name, ep.update.name)?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "export async function DELETE(req: Request) {{")?;
    writeln!(out, "  return isBulk(req) ? {}(req) : {}(req);", ep.bulk_delete.name, ep.delete.name)?;
    writeln!(out, "}}")?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::context::test_support::posts_context;

    #[test]
    fn test_model() {
        let model = render_model(&posts_context()).unwrap();
        assert!(model.contains("const postSchema = new Schema("));
        assert!(model.contains("title: { type: String, required: true, trim: true },"));
        assert!(model.contains("status: { type: String, enum: ['draft', 'published'] },"));
        assert!(model.contains("tags: { type: [String], default: [] },"));
        assert!(model.contains("views: { type: Number },"));
        assert!(model.contains("export default mongoose.models.Posts || mongoose.model('Posts', postSchema);"));
    }

    #[test]
    fn test_controller_crud_contract() {
        let controller = render_controller(&posts_context()).unwrap();
        for name in [
            "export const getPosts = withDB",
            "export const getPostsById = withDB",
            "export const addPosts = withDB",
            "export const updatePosts = withDB",
            "export const deletePosts = withDB",
            "export const bulkUpdatePosts = withDB",
            "export const bulkDeletePosts = withDB",
            "export const getPostsSummary = withDB",
        ] {
            assert!(controller.contains(name), "missing {}", name);
        }
        assert!(controller.contains("Promise.allSettled"));
        assert!(controller.contains("filter.$or = [{ title: regex }, { email: regex }, { status: regex }, { summary: regex }];"));
        assert!(controller.contains("viewsTotal: { $sum: '$views' },"));
        assert!(controller.contains("formatResponse({ posts: items, total, page, limit }"));
    }

    #[test]
    fn test_route_dispatch() {
        let route = render_route(&posts_context()).unwrap();
        assert!(route.contains("export async function GET"));
        assert!(route.contains("return isBulk(req) ? bulkDeletePosts(req) : deletePosts(req);"));
        assert!(route.contains("if (params.get('summary') === 'true') return getPostsSummary(req);"));
    }
}
