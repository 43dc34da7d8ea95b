//! Single-record and list components: Add, Edit, View, Delete, TableView,
//! FilterDialog, Summary and Export.

use super::form::{
    self, BUTTON_CLASS, DANGER_BUTTON_CLASS, INPUT_CLASS, LABEL_CLASS, SECONDARY_BUTTON_CLASS,
};
use crate::codegen::context::GenerationContext;
use crate::codegen::field_types::{SemanticType, WidgetKind};
use crate::codegen::utils::{escape_jsx_text, to_label, ts_member, ts_string};
use std::fmt::{self, Write};

/// Opening markup of a modal dialog. Pair with [`write_modal_close`].
pub(super) fn write_modal_open(out: &mut String, title: &str, close: &str, wide: bool) -> fmt::Result {
    let width = if wide { "max-w-5xl" } else { "max-w-lg" };
    writeln!(out, "    <div className=\"fixed inset-0 z-50 flex items-center justify-center bg-black/40\">")?;
    writeln!(
        out,
        "      <div className=\"max-h-[90vh] w-full {} overflow-y-auto rounded-lg bg-white p-6 shadow-xl\">",
        width
    )?;
    writeln!(out, "        <div className=\"mb-4 flex items-center justify-between\">")?;
    writeln!(out, "          <h2 className=\"text-lg font-semibold\">{}</h2>", escape_jsx_text(title))?;
    writeln!(out, "          <button className=\"text-gray-500 hover:text-gray-800\" onClick={{{}}}>&times;</button>", close)?;
    writeln!(out, "        </div>")?;
    Ok(())
}

pub(super) fn write_modal_close(out: &mut String) -> fmt::Result {
    writeln!(out, "      </div>")?;
    writeln!(out, "    </div>")?;
    Ok(())
}

/// Error list rendered from an `errors: string[]` state variable
pub(super) fn write_error_list(out: &mut String) -> fmt::Result {
    writeln!(out, "        {{errors.length > 0 && (")?;
    writeln!(out, "          <ul className=\"mb-4 list-disc rounded bg-red-50 p-3 pl-6 text-sm text-red-700\">")?;
    writeln!(out, "            {{errors.map((message) => (")?;
    writeln!(out, "              <li key={{message}}>{{message}}</li>")?;
    writeln!(out, "            ))}}")?;
    writeln!(out, "          </ul>")?;
    writeln!(out, "        )}}")?;
    Ok(())
}

/// Converts a caught mutation error to a message
pub(super) const ERROR_MESSAGE_FN: &str =
    "const errorMessage = (error: unknown, fallback: string) =>\n  (error as { data?: { message?: string } })?.data?.message ?? fallback;";

pub fn render_add(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let widgets = ctx.widget_components();
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ useState }} from 'react';")?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out, "import {{ {} }} from '../redux/rtk-api';", naming.endpoints.add.hook)?;
    writeln!(out, "import {{ {} }} from '../store/data/data';", naming.validate_fn)?;
    form::write_widget_imports(&mut out, &widgets)?;
    writeln!(out)?;
    writeln!(out, "{}", ERROR_MESSAGE_FN)?;
    writeln!(out)?;
    writeln!(out, "export default function Add() {{")?;
    writeln!(out, "  const {{ modals, newItem, setNewItem, resetNewItem, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(out, "  const [{}, {{ isLoading }}] = {}();", naming.endpoints.add.name, naming.endpoints.add.hook)?;
    writeln!(out, "  const [errors, setErrors] = useState<string[]>([]);")?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.add) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const close = () => {{")?;
    writeln!(out, "    setErrors([]);")?;
    writeln!(out, "    resetNewItem();")?;
    writeln!(out, "    toggleModal('add', false);")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  const handleSubmit = async () => {{")?;
    writeln!(out, "    const found = {}(newItem);", naming.validate_fn)?;
    writeln!(out, "    if (found.length > 0) {{")?;
    writeln!(out, "      setErrors(found);")?;
    writeln!(out, "      return;")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    try {{")?;
    writeln!(out, "      await {}(newItem).unwrap();", naming.endpoints.add.name)?;
    writeln!(out, "      close();")?;
    writeln!(out, "    }} catch (error) {{")?;
    writeln!(out, "      setErrors([errorMessage(error, {})]);", ts_string(&format!("Failed to add {}", naming.singular_lower)))?;
    writeln!(out, "    }}")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("Add {}", naming.singular_pascal), "close", false)?;
    write_error_list(&mut out)?;
    for field in ctx.fields() {
        form::write_field_input(&mut out, field, "newItem", "setNewItem", "add", 8)?;
    }
    writeln!(out, "        <div className=\"flex justify-end gap-2\">")?;
    writeln!(out, "          <button className=\"{}\" onClick={{close}}>Cancel</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "          <button className=\"{}\" disabled={{isLoading}} onClick={{handleSubmit}}>", BUTTON_CLASS)?;
    writeln!(out, "            {{isLoading ? 'Saving...' : 'Save'}}")?;
    writeln!(out, "          </button>")?;
    writeln!(out, "        </div>")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

pub fn render_edit(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let update = &naming.endpoints.update;
    let widgets = ctx.widget_components();
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ useEffect, useState }} from 'react';")?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out, "import {{ {} }} from '../redux/rtk-api';", update.hook)?;
    writeln!(out, "import {{ {}, {} }} from '../store/data/data';", naming.interface_name, naming.validate_fn)?;
    form::write_widget_imports(&mut out, &widgets)?;
    writeln!(out)?;
    writeln!(out, "{}", ERROR_MESSAGE_FN)?;
    writeln!(out)?;
    writeln!(out, "export default function Edit() {{")?;
    writeln!(out, "  const {{ modals, selectedItem, setSelectedItem, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(out, "  const [{}, {{ isLoading }}] = {}();", update.name, update.hook)?;
    writeln!(out, "  const [item, setItem] = useState<{} | null>(selectedItem);", naming.interface_name)?;
    writeln!(out, "  const [errors, setErrors] = useState<string[]>([]);")?;
    writeln!(out)?;
    writeln!(out, "  useEffect(() => {{")?;
    writeln!(out, "    setItem(selectedItem);")?;
    writeln!(out, "  }}, [selectedItem]);")?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.edit || !item) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const close = () => {{")?;
    writeln!(out, "    setErrors([]);")?;
    writeln!(out, "    setSelectedItem(null);")?;
    writeln!(out, "    toggleModal('edit', false);")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  const handleSubmit = async () => {{")?;
    writeln!(out, "    const found = {}(item);", naming.validate_fn)?;
    writeln!(out, "    if (found.length > 0) {{")?;
    writeln!(out, "      setErrors(found);")?;
    writeln!(out, "      return;")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    try {{")?;
    writeln!(out, "      await {}({{ ...item, id: item._id as string }}).unwrap();", update.name)?;
    writeln!(out, "      close();")?;
    writeln!(out, "    }} catch (error) {{")?;
    writeln!(out, "      setErrors([errorMessage(error, {})]);", ts_string(&format!("Failed to update {}", naming.singular_lower)))?;
    writeln!(out, "    }}")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("Edit {}", naming.singular_pascal), "close", false)?;
    write_error_list(&mut out)?;
    for field in ctx.fields() {
        form::write_field_input(&mut out, field, "item", "setItem", "edit", 8)?;
    }
    writeln!(out, "        <div className=\"flex justify-end gap-2\">")?;
    writeln!(out, "          <button className=\"{}\" onClick={{close}}>Cancel</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "          <button className=\"{}\" disabled={{isLoading}} onClick={{handleSubmit}}>", BUTTON_CLASS)?;
    writeln!(out, "            {{isLoading ? 'Updating...' : 'Update'}}")?;
    writeln!(out, "          </button>")?;
    writeln!(out, "        </div>")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

pub fn render_view(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out)?;
    writeln!(out, "export default function View() {{")?;
    writeln!(out, "  const {{ modals, selectedItem, setSelectedItem, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.view || !selectedItem) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const close = () => {{")?;
    writeln!(out, "    setSelectedItem(null);")?;
    writeln!(out, "    toggleModal('view', false);")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("{} Details", naming.singular_pascal), "close", false)?;
    writeln!(out, "        <dl className=\"divide-y divide-gray-100\">")?;
    for field in ctx.fields() {
        writeln!(out, "          <div className=\"grid grid-cols-3 gap-4 py-2\">")?;
        writeln!(out, "            <dt className=\"text-sm font-medium text-gray-600\">{}</dt>", form::label(field))?;
        match field.widget() {
            WidgetKind::Image => writeln!(
                out,
                "            <dd className=\"col-span-2\">{{{v} && <img src={{{v}}} alt={} className=\"h-24 rounded object-cover\" />}}</dd>",
                ts_string(&to_label(field.name())),
                v = ts_member("selectedItem", field.name())
            )?,
            WidgetKind::Images => writeln!(
                out,
                "            <dd className=\"col-span-2 flex flex-wrap gap-2\">{{({} ?? []).map((src) => <img key={{src}} src={{src}} alt=\"\" className=\"h-16 rounded object-cover\" />)}}</dd>",
                ts_member("selectedItem", field.name())
            )?,
            WidgetKind::Color => writeln!(
                out,
                "            <dd className=\"col-span-2 flex items-center gap-2\"><span className=\"inline-block h-4 w-4 rounded\" style={{{{ backgroundColor: {v} }}}} />{{{v}}}</dd>",
                v = ts_member("selectedItem", field.name())
            )?,
            _ => writeln!(
                out,
                "            <dd className=\"col-span-2 text-sm\">{{{}}}</dd>",
                form::display_expr(field, "selectedItem")
            )?,
        }
        writeln!(out, "          </div>")?;
    }
    writeln!(out, "          <div className=\"grid grid-cols-3 gap-4 py-2\">")?;
    writeln!(out, "            <dt className=\"text-sm font-medium text-gray-600\">Created At</dt>")?;
    writeln!(out, "            <dd className=\"col-span-2 text-sm\">{{selectedItem.createdAt ? new Date(selectedItem.createdAt).toLocaleString() : ''}}</dd>")?;
    writeln!(out, "          </div>")?;
    writeln!(out, "          <div className=\"grid grid-cols-3 gap-4 py-2\">")?;
    writeln!(out, "            <dt className=\"text-sm font-medium text-gray-600\">Updated At</dt>")?;
    writeln!(out, "            <dd className=\"col-span-2 text-sm\">{{selectedItem.updatedAt ? new Date(selectedItem.updatedAt).toLocaleString() : ''}}</dd>")?;
    writeln!(out, "          </div>")?;
    writeln!(out, "        </dl>")?;
    writeln!(out, "        <div className=\"mt-4 flex justify-end\">")?;
    writeln!(out, "          <button className=\"{}\" onClick={{close}}>Close</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "        </div>")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

pub fn render_delete(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let delete = &naming.endpoints.delete;
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ useState }} from 'react';")?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out, "import {{ {} }} from '../redux/rtk-api';", delete.hook)?;
    writeln!(out)?;
    writeln!(out, "{}", ERROR_MESSAGE_FN)?;
    writeln!(out)?;
    writeln!(out, "export default function Delete() {{")?;
    writeln!(out, "  const {{ modals, selectedItem, setSelectedItem, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(out, "  const [{}, {{ isLoading }}] = {}();", delete.name, delete.hook)?;
    writeln!(out, "  const [errors, setErrors] = useState<string[]>([]);")?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.delete || !selectedItem) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const close = () => {{")?;
    writeln!(out, "    setErrors([]);")?;
    writeln!(out, "    setSelectedItem(null);")?;
    writeln!(out, "    toggleModal('delete', false);")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  const handleDelete = async () => {{")?;
    writeln!(out, "    try {{")?;
    writeln!(out, "      await {}({{ id: selectedItem._id as string }}).unwrap();", delete.name)?;
    writeln!(out, "      close();")?;
    writeln!(out, "    }} catch (error) {{")?;
    writeln!(out, "      setErrors([errorMessage(error, {})]);", ts_string(&format!("Failed to delete {}", naming.singular_lower)))?;
    writeln!(out, "    }}")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("Delete {}", naming.singular_pascal), "close", false)?;
    write_error_list(&mut out)?;
    writeln!(
        out,
        "        <p className=\"mb-4 text-sm\">Are you sure you want to delete this {}? This action cannot be undone.</p>",
        naming.singular_lower
    )?;
    writeln!(out, "        <div className=\"flex justify-end gap-2\">")?;
    writeln!(out, "          <button className=\"{}\" onClick={{close}}>Cancel</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "          <button className=\"{}\" disabled={{isLoading}} onClick={{handleDelete}}>", DANGER_BUTTON_CLASS)?;
    writeln!(out, "            {{isLoading ? 'Deleting...' : 'Delete'}}")?;
    writeln!(out, "          </button>")?;
    writeln!(out, "        </div>")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

pub fn render_table(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let iface = &naming.interface_name;
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ useMemo, useState }} from 'react';")?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out, "import {{ {} }} from '../store/data/data';", iface)?;
    writeln!(out)?;
    writeln!(out, "type SortKey = keyof {};", iface)?;
    writeln!(out)?;
    writeln!(out, "const columns: {{ key: SortKey; label: string; render: (row: {}) => string }}[] = [", iface)?;
    for field in ctx.fields() {
        writeln!(
            out,
            "  {{ key: {}, label: {}, render: (row) => {} }},",
            ts_string(field.name()),
            ts_string(&to_label(field.name())),
            form::display_expr(field, "row")
        )?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;
    writeln!(out, "export default function TableView({{ items }}: {{ items: {}[] }}) {{", iface)?;
    writeln!(out, "  const {{ bulkData, setBulkData, setSelectedItem, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(out, "  const [sortKey, setSortKey] = useState<SortKey | null>(null);")?;
    writeln!(out, "  const [sortAsc, setSortAsc] = useState(true);")?;
    writeln!(out)?;
    writeln!(out, "  const sorted = useMemo(() => {{")?;
    writeln!(out, "    if (!sortKey) return items;")?;
    writeln!(out, "    return [...items].sort((a, b) => {{")?;
    writeln!(out, "      const left = String(a[sortKey] ?? '');")?;
    writeln!(out, "      const right = String(b[sortKey] ?? '');")?;
    writeln!(out, "      const order = left.localeCompare(right, undefined, {{ numeric: true }});")?;
    writeln!(out, "      return sortAsc ? order : -order;")?;
    writeln!(out, "    }});")?;
    writeln!(out, "  }}, [items, sortKey, sortAsc]);")?;
    writeln!(out)?;
    writeln!(out, "  const isSelected = (row: {}) => bulkData.some((b) => b._id === row._id);", iface)?;
    writeln!(out, "  const allSelected = items.length > 0 && items.every(isSelected);")?;
    writeln!(out)?;
    writeln!(out, "  const toggleRow = (row: {}) =>", iface)?;
    writeln!(out, "    setBulkData(isSelected(row) ? bulkData.filter((b) => b._id !== row._id) : [...bulkData, row]);")?;
    writeln!(out)?;
    writeln!(out, "  const toggleAll = () => setBulkData(allSelected ? [] : items);")?;
    writeln!(out)?;
    writeln!(out, "  const handleSort = (key: SortKey) => {{")?;
    writeln!(out, "    if (sortKey === key) {{")?;
    writeln!(out, "      setSortAsc(!sortAsc);")?;
    writeln!(out, "    }} else {{")?;
    writeln!(out, "      setSortKey(key);")?;
    writeln!(out, "      setSortAsc(true);")?;
    writeln!(out, "    }}")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  const open = (row: {}, modal: 'view' | 'edit' | 'delete') => {{", iface)?;
    writeln!(out, "    setSelectedItem(row);")?;
    writeln!(out, "    toggleModal(modal, true);")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  if (items.length === 0) {{")?;
    writeln!(out, "    return <p className=\"py-8 text-center text-sm text-gray-500\">No {} found.</p>;", naming.plural_lower)?;
    writeln!(out, "  }}")?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    writeln!(out, "    <div className=\"overflow-x-auto rounded border border-gray-200\">")?;
    writeln!(out, "      <table className=\"min-w-full divide-y divide-gray-200 text-sm\">")?;
    writeln!(out, "        <thead className=\"bg-gray-50\">")?;
    writeln!(out, "          <tr>")?;
    writeln!(out, "            <th className=\"px-3 py-2\">")?;
    writeln!(out, "              <input type=\"checkbox\" checked={{allSelected}} onChange={{toggleAll}} />")?;
    writeln!(out, "            </th>")?;
    writeln!(out, "            {{columns.map((col) => (")?;
    writeln!(out, "              <th key={{String(col.key)}} className=\"cursor-pointer px-3 py-2 text-left font-medium\" onClick={{() => handleSort(col.key)}}>")?;
    writeln!(out, "                {{col.label}}")?;
    writeln!(out, "                {{sortKey === col.key ? (sortAsc ? ' \\u25B2' : ' \\u25BC') : ''}}")?;
    writeln!(out, "              </th>")?;
    writeln!(out, "            ))}}")?;
    writeln!(out, "            <th className=\"px-3 py-2 text-right font-medium\">Actions</th>")?;
    writeln!(out, "          </tr>")?;
    writeln!(out, "        </thead>")?;
    writeln!(out, "        <tbody className=\"divide-y divide-gray-100\">")?;
    writeln!(out, "          {{sorted.map((row) => (")?;
    writeln!(out, "            <tr key={{row._id}} className=\"hover:bg-gray-50\">")?;
    writeln!(out, "              <td className=\"px-3 py-2\">")?;
    writeln!(out, "                <input type=\"checkbox\" checked={{isSelected(row)}} onChange={{() => toggleRow(row)}} />")?;
    writeln!(out, "              </td>")?;
    writeln!(out, "              {{columns.map((col) => (")?;
    writeln!(out, "                <td key={{String(col.key)}} className=\"max-w-xs truncate px-3 py-2\">")?;
    writeln!(out, "                  {{col.render(row)}}")?;
    writeln!(out, "                </td>")?;
    writeln!(out, "              ))}}")?;
    writeln!(out, "              <td className=\"whitespace-nowrap px-3 py-2 text-right\">")?;
    writeln!(out, "                <button className=\"mr-2 text-blue-600\" onClick={{() => open(row, 'view')}}>View</button>")?;
    writeln!(out, "                <button className=\"mr-2 text-amber-600\" onClick={{() => open(row, 'edit')}}>Edit</button>")?;
    writeln!(out, "                <button className=\"text-red-600\" onClick={{() => open(row, 'delete')}}>Delete</button>")?;
    writeln!(out, "              </td>")?;
    writeln!(out, "            </tr>")?;
    writeln!(out, "          ))}}")?;
    writeln!(out, "        </tbody>")?;
    writeln!(out, "      </table>")?;
    writeln!(out, "    </div>")?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

pub fn render_filter(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ useEffect, useState }} from 'react';")?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out)?;
    writeln!(out, "export default function FilterDialog() {{")?;
    writeln!(out, "  const {{ modals, dateRange, setDateRange, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(out, "  const [start, setStart] = useState(dateRange.start);")?;
    writeln!(out, "  const [end, setEnd] = useState(dateRange.end);")?;
    writeln!(out)?;
    writeln!(out, "  useEffect(() => {{")?;
    writeln!(out, "    setStart(dateRange.start);")?;
    writeln!(out, "    setEnd(dateRange.end);")?;
    writeln!(out, "  }}, [dateRange]);")?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.filter) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const close = () => toggleModal('filter', false);")?;
    writeln!(out, "  const invalid = Boolean(start && end && start > end);")?;
    writeln!(out)?;
    writeln!(out, "  const apply = () => {{")?;
    writeln!(out, "    setDateRange({{ start, end }});")?;
    writeln!(out, "    close();")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  const reset = () => {{")?;
    writeln!(out, "    setDateRange({{ start: '', end: '' }});")?;
    writeln!(out, "    close();")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("Filter {}", naming.plural_pascal), "close", false)?;
    writeln!(out, "        <div className=\"mb-4\">")?;
    writeln!(out, "          <label htmlFor=\"filter-start\" className=\"{}\">Created from</label>", LABEL_CLASS)?;
    writeln!(out, "          <input id=\"filter-start\" type=\"date\" className=\"{}\" value={{start}} onChange={{(e) => setStart(e.target.value)}} />", INPUT_CLASS)?;
    writeln!(out, "        </div>")?;
    writeln!(out, "        <div className=\"mb-4\">")?;
    writeln!(out, "          <label htmlFor=\"filter-end\" className=\"{}\">Created to</label>", LABEL_CLASS)?;
    writeln!(out, "          <input id=\"filter-end\" type=\"date\" className=\"{}\" value={{end}} onChange={{(e) => setEnd(e.target.value)}} />", INPUT_CLASS)?;
    writeln!(out, "        </div>")?;
    writeln!(out, "        {{invalid && <p className=\"mb-4 text-sm text-red-600\">Start date must be before end date.</p>}}")?;
    writeln!(out, "        <div className=\"flex justify-end gap-2\">")?;
    writeln!(out, "          <button className=\"{}\" onClick={{reset}}>Reset</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "          <button className=\"{}\" disabled={{invalid}} onClick={{apply}}>Apply</button>", BUTTON_CLASS)?;
    writeln!(out, "        </div>")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

pub fn render_summary(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let summary = &naming.endpoints.summary;
    let numeric: Vec<_> = ctx
        .fields()
        .iter()
        .filter(|f| matches!(f.class.semantic_type(), SemanticType::Integer | SemanticType::Float))
        .collect();
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out, "import {{ {} }} from '../redux/rtk-api';", summary.hook)?;
    writeln!(out)?;
    writeln!(out, "interface MonthlyRow {{")?;
    writeln!(out, "  _id: {{ year: number; month: number }};")?;
    writeln!(out, "  count: number;")?;
    writeln!(out, "  [total: string]: unknown;")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "const monthLabel = (row: MonthlyRow) =>")?;
    writeln!(out, "  new Date(row._id.year, row._id.month - 1).toLocaleString(undefined, {{ month: 'short', year: 'numeric' }});")?;
    writeln!(out)?;
    writeln!(out, "export default function Summary() {{")?;
    writeln!(out, "  const {{ modals, dateRange, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(out, "  const {{ data, isLoading, isError }} = {}(", summary.hook)?;
    writeln!(out, "    {{ startDate: dateRange.start, endDate: dateRange.end }},")?;
    writeln!(out, "    {{ skip: !modals.summary }}")?;
    writeln!(out, "  );")?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.summary) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const close = () => toggleModal('summary', false);")?;
    writeln!(out, "  const monthly: MonthlyRow[] = data?.data?.monthly ?? [];")?;
    writeln!(out, "  const totalCount: number = data?.data?.totalCount ?? 0;")?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("{} Summary", naming.plural_pascal), "close", true)?;
    writeln!(out, "        {{isLoading && <p className=\"text-sm text-gray-500\">Loading...</p>}}")?;
    writeln!(out, "        {{isError && <p className=\"text-sm text-red-600\">Failed to load summary.</p>}}")?;
    writeln!(out, "        <p className=\"mb-4 text-sm\">Total {}: {{totalCount}}</p>", naming.plural_lower)?;
    writeln!(out, "        <table className=\"min-w-full divide-y divide-gray-200 text-sm\">")?;
    writeln!(out, "          <thead className=\"bg-gray-50\">")?;
    writeln!(out, "            <tr>")?;
    writeln!(out, "              <th className=\"px-3 py-2 text-left\">Month</th>")?;
    writeln!(out, "              <th className=\"px-3 py-2 text-right\">Count</th>")?;
    for field in &numeric {
        writeln!(out, "              <th className=\"px-3 py-2 text-right\">{} Total</th>", form::label(field))?;
    }
    writeln!(out, "            </tr>")?;
    writeln!(out, "          </thead>")?;
    writeln!(out, "          <tbody className=\"divide-y divide-gray-100\">")?;
    writeln!(out, "            {{monthly.map((row) => (")?;
    writeln!(out, "              <tr key={{`${{row._id.year}}-${{row._id.month}}`}}>")?;
    writeln!(out, "                <td className=\"px-3 py-2\">{{monthLabel(row)}}</td>")?;
    writeln!(out, "                <td className=\"px-3 py-2 text-right\">{{row.count}}</td>")?;
    for field in &numeric {
        writeln!(
            out,
            "                <td className=\"px-3 py-2 text-right\">{{String(row[{}] ?? 0)}}</td>",
            ts_string(&format!("{}Total", field.name()))
        )?;
    }
    writeln!(out, "              </tr>")?;
    writeln!(out, "            ))}}")?;
    writeln!(out, "          </tbody>")?;
    writeln!(out, "        </table>")?;
    writeln!(out, "        <div className=\"mt-4 flex justify-end\">")?;
    writeln!(out, "          <button className=\"{}\" onClick={{close}}>Close</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "        </div>")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

pub fn render_export(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let iface = &naming.interface_name;
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "import {{ useState }} from 'react';")?;
    writeln!(out, "import {{ {} }} from '../store/store';", naming.store_hook)?;
    writeln!(out, "import {{ {} }} from '../store/data/data';", iface)?;
    writeln!(out)?;
    writeln!(out, "const headers: {{ key: keyof {}; label: string }}[] = [", iface)?;
    for field in ctx.fields() {
        writeln!(
            out,
            "  {{ key: {}, label: {} }},",
            ts_string(field.name()),
            ts_string(&to_label(field.name()))
        )?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;
    writeln!(out, "const csvCell = (value: unknown) => {{")?;
    writeln!(out, "  const text = Array.isArray(value) ? value.join('; ') : value instanceof Object ? JSON.stringify(value) : String(value ?? '');")?;
    writeln!(out, "  return /[\",\\n]/.test(text) ? `\"${{text.replace(/\"/g, '\"\"')}}\"` : text;")?;
    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(out, "const toCsv = (rows: {}[]) =>", iface)?;
    writeln!(out, "  [headers.map((h) => csvCell(h.label)).join(','), ...rows.map((row) => headers.map((h) => csvCell(row[h.key])).join(','))].join('\\n');")?;
    writeln!(out)?;
    writeln!(out, "const download = (content: string, type: string, filename: string) => {{")?;
    writeln!(out, "  const url = URL.createObjectURL(new Blob([content], {{ type }}));")?;
    writeln!(out, "  const link = document.createElement('a');")?;
    writeln!(out, "  link.href = url;")?;
    writeln!(out, "  link.download = filename;")?;
    writeln!(out, "  link.click();")?;
    writeln!(out, "  URL.revokeObjectURL(url);")?;
    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(out, "export default function Export({{ items }}: {{ items: {}[] }}) {{", iface)?;
    writeln!(out, "  const {{ modals, bulkData, toggleModal }} = {}();", naming.store_hook)?;
    writeln!(out, "  const [format, setFormat] = useState<'csv' | 'json'>('csv');")?;
    writeln!(out)?;
    writeln!(out, "  if (!modals.export) return null;")?;
    writeln!(out)?;
    writeln!(out, "  const rows = bulkData.length > 0 ? bulkData : items;")?;
    writeln!(out, "  const close = () => toggleModal('export', false);")?;
    writeln!(out)?;
    writeln!(out, "  const handleExport = () => {{")?;
    writeln!(out, "    if (format === 'csv') {{")?;
    writeln!(out, "      download(toCsv(rows), 'text/csv;charset=utf-8', '{}.csv');", naming.plural_lower)?;
    writeln!(out, "    }} else {{")?;
    writeln!(out, "      download(JSON.stringify(rows, null, 2), 'application/json', '{}.json');", naming.plural_lower)?;
    writeln!(out, "    }}")?;
    writeln!(out, "    close();")?;
    writeln!(out, "  }};")?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    write_modal_open(&mut out, &format!("Export {}", naming.plural_pascal), "close", false)?;
    writeln!(out, "        <p className=\"mb-4 text-sm\">{{rows.length}} {} will be exported.</p>", naming.plural_lower)?;
    writeln!(out, "        <div className=\"mb-4 flex gap-4 text-sm\">")?;
    writeln!(out, "          <label className=\"flex items-center gap-2\">")?;
    writeln!(out, "            <input type=\"radio\" checked={{format === 'csv'}} onChange={{() => setFormat('csv')}} /> CSV")?;
    writeln!(out, "          </label>")?;
    writeln!(out, "          <label className=\"flex items-center gap-2\">")?;
    writeln!(out, "            <input type=\"radio\" checked={{format === 'json'}} onChange={{() => setFormat('json')}} /> JSON")?;
    writeln!(out, "          </label>")?;
    writeln!(out, "        </div>")?;
    writeln!(out, "        <div className=\"flex justify-end gap-2\">")?;
    writeln!(out, "          <button className=\"{}\" onClick={{close}}>Cancel</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "          <button className=\"{}\" disabled={{rows.length === 0}} onClick={{handleExport}}>Export</button>", BUTTON_CLASS)?;
    writeln!(out, "        </div>")?;
    write_modal_close(&mut out)?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}
