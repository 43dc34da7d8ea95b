//! Bulk components operating on the rows selected in the table (`bulkData`).

use super::components::{write_error_list, write_modal_close, write_modal_open, ERROR_MESSAGE_FN};
use super::form::{self, InputId, BUTTON_CLASS, DANGER_BUTTON_CLASS, INPUT_CLASS, LABEL_CLASS, SECONDARY_BUTTON_CLASS};
use crate::codegen::context::GenerationContext;
use crate::codegen::utils::{ts_member, ts_string};
use std::fmt::{self, Write};

fn write_header(out: &mut String, ctx: &GenerationContext) -> fmt::Result {
    let naming = ctx.naming();
    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ useState }} from 'react';")?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out, "import {{ {} }} from '../redux/rtk-api';", naming.endpoints.bulk_update.hook)?;
    writeln!(
        out,
        "import {{ {}, {} }} from '../store/data/data';",
        naming.interface_name, naming.default_const
    )?;
    form::write_widget_imports(out, &ctx.widget_components())?;
    writeln!(out)?;
    writeln!(out, "{}", ERROR_MESSAGE_FN)?;
    writeln!(out)?;
    Ok(())
}

fn write_submit_row(out: &mut String, action: &str, busy: &str, idle: &str) -> fmt::Result {
    writeln!(out, "        <div className=\"flex justify-end gap-2\">")?;
    writeln!(out, "          <button className=\"{}\" onClick={{close}}>Cancel</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(
        out,
        "          <button className=\"{}\" disabled={{isLoading || bulkData.length === 0}} onClick={{{}}}>",
        BUTTON_CLASS, action
    )?;
    writeln!(out, "            {{isLoading ? '{}' : '{}'}}", busy, idle)?;
    writeln!(out, "          </button>")?;
    writeln!(out, "        </div>")?;
    Ok(())
}

fn write_submit_handler(out: &mut String, ctx: &GenerationContext, updates: &str) -> fmt::Result {
    let naming = ctx.naming();
    writeln!(out, "  const handleSubmit = async () => {{")?;
    writeln!(out, "    try {{")?;
    writeln!(out, "      await {}({}).unwrap();", naming.endpoints.bulk_update.name, updates)?;
    writeln!(out, "      setBulkData([]);")?;
    writeln!(out, "      close();")?;
    writeln!(out, "    }} catch (error) {{")?;
    writeln!(
        out,
        "      setErrors([errorMessage(error, {})]);",
        ts_string(&format!("Failed to update {}", naming.plural_lower))
    )?;
    writeln!(out, "    }}")?;
    writeln!(out, "  }};")?;
    Ok(())
}

/// Row-by-row editor: every selected record gets its own set of inputs
pub fn render_bulk_edit(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let iface = &naming.interface_name;
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ useEffect, useState }} from 'react';")?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out, "import {{ {} }} from '../redux/rtk-api';", naming.endpoints.bulk_update.hook)?;
    writeln!(out, "import {{ {} }} from '../store/data/data';", iface)?;
    form::write_widget_imports(&mut out, &ctx.widget_components())?;
    writeln!(out)?;
    writeln!(out, "{}", ERROR_MESSAGE_FN)?;
    writeln!(out)?;
    writeln!(out, "export default function BulkEdit() {{")?;
    writeln!(out, "  const {{ modals, bulkData, setBulkData, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(
        out,
        "  const [{}, {{ isLoading }}] = {}();",
        naming.endpoints.bulk_update.name, naming.endpoints.bulk_update.hook
    )?;
    writeln!(out, "  const [rows, setRows] = useState<{}[]>(bulkData);", iface)?;
    writeln!(out, "  const [errors, setErrors] = useState<string[]>([]);")?;
    writeln!(out)?;
    writeln!(out, "  useEffect(() => {{")?;
    writeln!(out, "    setRows(bulkData);")?;
    writeln!(out, "  }}, [bulkData]);")?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.bulkEdit) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const close = () => {{")?;
    writeln!(out, "    setErrors([]);")?;
    writeln!(out, "    toggleModal('bulkEdit', false);")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  const updateRow = (index: number, key: keyof {}, value: unknown) =>", iface)?;
    writeln!(out, "    setRows(rows.map((row, i) => (i === index ? {{ ...row, [key]: value }} : row)));")?;
    writeln!(out)?;
    write_submit_handler(
        &mut out,
        ctx,
        "rows.map(({ _id, ...updateData }) => ({ id: _id as string, updateData }))",
    )?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("Bulk Edit {}", naming.plural_pascal), "close", true)?;
    write_error_list(&mut out)?;
    writeln!(out, "        <div className=\"overflow-x-auto\">")?;
    writeln!(out, "          <table className=\"min-w-full text-sm\">")?;
    writeln!(out, "            <thead>")?;
    writeln!(out, "              <tr>")?;
    for field in ctx.fields() {
        writeln!(out, "                <th className=\"px-2 py-1 text-left font-medium\">{}</th>", form::label(field))?;
    }
    writeln!(out, "              </tr>")?;
    writeln!(out, "            </thead>")?;
    writeln!(out, "            <tbody>")?;
    writeln!(out, "              {{rows.map((row, index) => (")?;
    writeln!(out, "                <tr key={{row._id ?? index}}>")?;
    for field in ctx.fields() {
        let key = ts_string(field.name());
        writeln!(out, "                  <td className=\"min-w-[10rem] px-2 py-1 align-top\">")?;
        form::write_bare_input(
            &mut out,
            field,
            &ts_member("row", field.name()),
            |v| format!("updateRow(index, {}, {})", key, v),
            &InputId::per_row("bulk-edit", field),
            20,
        )?;
        writeln!(out, "                  </td>")?;
    }
    writeln!(out, "                </tr>")?;
    writeln!(out, "              ))}}")?;
    writeln!(out, "            </tbody>")?;
    writeln!(out, "          </table>")?;
    writeln!(out, "        </div>")?;
    write_submit_row(&mut out, "handleSubmit", "Saving...", "Save All")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

/// Sets one chosen field to the same value on every selected record
pub fn render_bulk_update(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let iface = &naming.interface_name;
    let mut out = String::new();

    write_header(&mut out, ctx)?;
    writeln!(out, "export default function BulkUpdate() {{")?;
    writeln!(out, "  const {{ modals, bulkData, setBulkData, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(
        out,
        "  const [{}, {{ isLoading }}] = {}();",
        naming.endpoints.bulk_update.name, naming.endpoints.bulk_update.hook
    )?;
    writeln!(out, "  const [field, setField] = useState<keyof {} | ''>('');", iface)?;
    writeln!(out, "  const [draft, setDraft] = useState<{}>({}());", iface, naming.default_const)?;
    writeln!(out, "  const [errors, setErrors] = useState<string[]>([]);")?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.bulkUpdate) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const close = () => {{")?;
    writeln!(out, "    setErrors([]);")?;
    writeln!(out, "    setField('');")?;
    writeln!(out, "    setDraft({}());", naming.default_const)?;
    writeln!(out, "    toggleModal('bulkUpdate', false);")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  const submit = async () => {{")?;
    writeln!(out, "    if (!field) {{")?;
    writeln!(out, "      setErrors(['Choose a field to update']);")?;
    writeln!(out, "      return;")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    await handleSubmit();")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    write_submit_handler(
        &mut out,
        ctx,
        "bulkData.map((item) => ({ id: item._id as string, updateData: { [field]: draft[field as keyof typeof draft] } }))",
    )?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("Bulk Update {}", naming.plural_pascal), "close", false)?;
    write_error_list(&mut out)?;
    writeln!(
        out,
        "        <p className=\"mb-4 text-sm\">{{bulkData.length}} {} selected.</p>",
        naming.plural_lower
    )?;
    writeln!(out, "        <div className=\"mb-4\">")?;
    writeln!(out, "          <label htmlFor=\"bulk-update-field\" className=\"{}\">Field</label>", LABEL_CLASS)?;
    writeln!(
        out,
        "          <select id=\"bulk-update-field\" className=\"{}\" value={{field}} onChange={{(e) => setField(e.target.value as keyof {})}}>",
        INPUT_CLASS, iface
    )?;
    writeln!(out, "            <option value=\"\">Select a field</option>")?;
    for field in ctx.fields() {
        writeln!(
            out,
            "            <option value={{{}}}>{}</option>",
            ts_string(field.name()),
            form::label(field)
        )?;
    }
    writeln!(out, "          </select>")?;
    writeln!(out, "        </div>")?;
    for field in ctx.fields() {
        writeln!(out, "        {{field === {} && (", ts_string(field.name()))?;
        form::write_field_input(&mut out, field, "draft", "setDraft", "bulk-update", 10)?;
        writeln!(out, "        )}}")?;
    }
    write_submit_row(&mut out, "submit", "Updating...", "Update Selected")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

/// Sets any number of ticked fields on every selected record
pub fn render_bulk_dynamic_update(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let iface = &naming.interface_name;
    let mut out = String::new();

    write_header(&mut out, ctx)?;
    writeln!(out, "type Enabled = Partial<Record<keyof {}, boolean>>;", iface)?;
    writeln!(out)?;
    writeln!(out, "export default function BulkDynamicUpdate() {{")?;
    writeln!(out, "  const {{ modals, bulkData, setBulkData, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(
        out,
        "  const [{}, {{ isLoading }}] = {}();",
        naming.endpoints.bulk_update.name, naming.endpoints.bulk_update.hook
    )?;
    writeln!(out, "  const [enabled, setEnabled] = useState<Enabled>({{}});")?;
    writeln!(out, "  const [draft, setDraft] = useState<{}>({}());", iface, naming.default_const)?;
    writeln!(out, "  const [errors, setErrors] = useState<string[]>([]);")?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.bulkDynamicUpdate) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const close = () => {{")?;
    writeln!(out, "    setErrors([]);")?;
    writeln!(out, "    setEnabled({{}});")?;
    writeln!(out, "    setDraft({}());", naming.default_const)?;
    writeln!(out, "    toggleModal('bulkDynamicUpdate', false);")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  const toggleField = (key: keyof {}) => setEnabled({{ ...enabled, [key]: !enabled[key] }});", iface)?;
    writeln!(out)?;
    writeln!(out, "  const updateData = (): Partial<{}> =>", iface)?;
    writeln!(out, "    Object.fromEntries(")?;
    writeln!(out, "      Object.entries(enabled)")?;
    writeln!(out, "        .filter(([, on]) => on)")?;
    writeln!(out, "        .map(([key]) => [key, draft[key as keyof {}]])", iface)?;
    writeln!(out, "    );")?;
    writeln!(out)?;
    writeln!(out, "  const submit = async () => {{")?;
    writeln!(out, "    if (Object.keys(updateData()).length === 0) {{")?;
    writeln!(out, "      setErrors(['Tick at least one field to update']);")?;
    writeln!(out, "      return;")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    await handleSubmit();")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    write_submit_handler(
        &mut out,
        ctx,
        "bulkData.map((item) => ({ id: item._id as string, updateData: updateData() }))",
    )?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("Bulk Dynamic Update {}", naming.plural_pascal), "close", true)?;
    write_error_list(&mut out)?;
    writeln!(
        out,
        "        <p className=\"mb-4 text-sm\">{{bulkData.length}} {} selected. Tick the fields to change.</p>",
        naming.plural_lower
    )?;
    for field in ctx.fields() {
        let key = ts_string(field.name());
        writeln!(out, "        <div className=\"mb-2 rounded border border-gray-200 p-3\">")?;
        writeln!(out, "          <label className=\"flex items-center gap-2 text-sm font-medium\">")?;
        writeln!(
            out,
            "            <input type=\"checkbox\" checked={{Boolean(enabled[{}])}} onChange={{() => toggleField({})}} />",
            key, key
        )?;
        writeln!(out, "            {}", form::label(field))?;
        writeln!(out, "          </label>")?;
        writeln!(out, "          {{enabled[{}] && (", key)?;
        writeln!(out, "            <div className=\"mt-2\">")?;
        form::write_bare_input(
            &mut out,
            field,
            &ts_member("draft", field.name()),
            |v| form::set_field("setDraft", "draft", field, v),
            &InputId::literal("bulk-dynamic", field),
            14,
        )?;
        writeln!(out, "            </div>")?;
        writeln!(out, "          )}}")?;
        writeln!(out, "        </div>")?;
    }
    write_submit_row(&mut out, "submit", "Updating...", "Update Selected")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

pub fn render_bulk_delete(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let delete = &naming.endpoints.bulk_delete;
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ useState }} from 'react';")?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out, "import {{ {} }} from '../redux/rtk-api';", delete.hook)?;
    writeln!(out)?;
    writeln!(out, "{}", ERROR_MESSAGE_FN)?;
    writeln!(out)?;
    writeln!(out, "export default function BulkDelete() {{")?;
    writeln!(out, "  const {{ modals, bulkData, setBulkData, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(out, "  const [{}, {{ isLoading }}] = {}();", delete.name, delete.hook)?;
    writeln!(out, "  const [errors, setErrors] = useState<string[]>([]);")?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.bulkDelete) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const close = () => {{")?;
    writeln!(out, "    setErrors([]);")?;
    writeln!(out, "    toggleModal('bulkDelete', false);")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  const handleDelete = async () => {{")?;
    writeln!(out, "    try {{")?;
    writeln!(
        out,
        "      await {}(bulkData.map((item) => item._id as string)).unwrap();",
        delete.name
    )?;
    writeln!(out, "      setBulkData([]);")?;
    writeln!(out, "      close();")?;
    writeln!(out, "    }} catch (error) {{")?;
    writeln!(
        out,
        "      setErrors([errorMessage(error, {})]);",
        ts_string(&format!("Failed to delete {}", naming.plural_lower))
    )?;
    writeln!(out, "    }}")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("Delete {}", naming.plural_pascal), "close", false)?;
    write_error_list(&mut out)?;
    writeln!(
        out,
        "        <p className=\"mb-2 text-sm\">Delete {{bulkData.length}} selected {}? This action cannot be undone.</p>",
        naming.plural_lower
    )?;
    if let Some(first) = ctx.fields().first() {
        writeln!(out, "        <ul className=\"mb-4 max-h-40 list-disc overflow-y-auto pl-6 text-sm text-gray-600\">")?;
        writeln!(out, "          {{bulkData.map((item) => (")?;
        writeln!(out, "            <li key={{item._id}}>{{{}}}</li>", form::display_expr(first, "item"))?;
        writeln!(out, "          ))}}")?;
        writeln!(out, "        </ul>")?;
    }
    writeln!(out, "        <div className=\"flex justify-end gap-2\">")?;
    writeln!(out, "          <button className=\"{}\" onClick={{close}}>Cancel</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(
        out,
        "          <button className=\"{}\" disabled={{isLoading || bulkData.length === 0}} onClick={{handleDelete}}>",
        DANGER_BUTTON_CLASS
    )?;
    writeln!(out, "            {{isLoading ? 'Deleting...' : 'Delete All'}}")?;
    writeln!(out, "          </button>")?;
    writeln!(out, "        </div>")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::context::test_support::posts_context;

    #[test]
    fn test_bulk_edit_row_inputs() {
        let edit = render_bulk_edit(&posts_context()).unwrap();
        assert!(edit.contains("<input id={`bulk-edit-Title-${index}`} type=\"text\""));
        assert!(edit.contains("onChange={(e) => updateRow(index, 'title', e.target.value)}"));
        assert!(edit.contains("await bulkUpdatePosts(rows.map(({ _id, ...updateData }) => ({ id: _id as string, updateData }))).unwrap();"));
        assert!(!edit.contains("${index}\""));
    }

    #[test]
    fn test_bulk_update_field_picker() {
        let update = render_bulk_update(&posts_context()).unwrap();
        assert!(update.contains("<option value={'status'}>Status</option>"));
        assert!(update.contains("{field === 'status' && ("));
        assert!(update.contains("useState<IPosts>(defaultPosts())"));
    }

    #[test]
    fn test_bulk_dynamic_update_toggles() {
        let dynamic = render_bulk_dynamic_update(&posts_context()).unwrap();
        assert!(dynamic.contains("checked={Boolean(enabled['views'])} onChange={() => toggleField('views')}"));
        assert!(dynamic.contains("if (!modals.bulkDynamicUpdate) return null;"));
    }

    #[test]
    fn test_bulk_delete_sends_ids() {
        let delete = render_bulk_delete(&posts_context()).unwrap();
        assert!(delete.contains("await bulkDeletePosts(bulkData.map((item) => item._id as string)).unwrap();"));
        assert!(delete.contains("<li key={item._id}>{String(item.title ?? '')}</li>"));
    }

    #[test]
    fn test_bulk_widget_ids() {
        let edit = render_bulk_edit(&posts_context()).unwrap();
        assert!(edit.contains("<SelectField id={`bulk-edit-Status-${index}`} value={row.status}"));
        let dynamic = render_bulk_dynamic_update(&posts_context()).unwrap();
        assert!(dynamic.contains("<SelectField id=\"bulk-dynamic-Status\""));
    }
}
