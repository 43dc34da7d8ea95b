//! Client-side plumbing: persisted schema, query-client slice, UI store,
//! entity data module and the list page that wires the components together.

use super::form::{self, BUTTON_CLASS, INPUT_CLASS, SECONDARY_BUTTON_CLASS};
use crate::codegen::context::GenerationContext;
use crate::codegen::utils::ts_property_key;
use std::fmt::{self, Write};

/// Modal names managed by the UI store
pub const MODALS: [&str; 11] = [
    "add",
    "edit",
    "view",
    "delete",
    "bulkEdit",
    "bulkUpdate",
    "bulkDynamicUpdate",
    "bulkDelete",
    "filter",
    "export",
    "summary",
];

pub fn render_slice_schema(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let mut out = serde_json::to_string_pretty(ctx.raw_schema()).map_err(|_| fmt::Error)?;
    out.push('\n');
    Ok(out)
}

pub fn render_query_slice(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let ep = &naming.endpoints;
    let tag = &naming.tag_type;
    let mut out = String::new();

    writeln!(out, "// Auto-generated query client for {}", naming.plural_pascal)?;
    writeln!(out, "import {{ createApi, fetchBaseQuery }} from '@reduxjs/toolkit/query/react';")?;
    writeln!(out, "import {{ {} }} from '../store/data/data';", naming.interface_name)?;
    writeln!(out)?;
    writeln!(out, "export interface ListQueryParams {{")?;
    writeln!(out, "  page: number;")?;
    writeln!(out, "  limit: number;")?;
    writeln!(out, "  q?: string;")?;
    writeln!(out, "  startDate?: string;")?;
    writeln!(out, "  endDate?: string;")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "const toSearch = (params: Record<string, string | number | undefined>) => {{")?;
    writeln!(out, "  const search = new URLSearchParams();")?;
    writeln!(out, "  Object.entries(params).forEach(([key, value]) => {{")?;
    writeln!(out, "    if (value !== undefined && value !== '') search.set(key, String(value));")?;
    writeln!(out, "  }});")?;
    writeln!(out, "  return `?${{search.toString()}}`;")?;
    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(out, "export const {} = createApi({{", naming.api_slice)?;
    writeln!(out, "  reducerPath: '{}',", naming.api_slice)?;
    writeln!(out, "  baseQuery: fetchBaseQuery({{ baseUrl: '{}' }}),", ctx.api_base_url())?;
    writeln!(out, "  tagTypes: ['{}'],", tag)?;
    writeln!(out, "  endpoints: (builder) => ({{")?;

    writeln!(out, "    {}: builder.query({{", ep.list.name)?;
    writeln!(out, "      query: ({{ page, limit, q, startDate, endDate }}: ListQueryParams) =>")?;
    writeln!(out, "        toSearch({{ page, limit, q, startDate, endDate }}),")?;
    writeln!(out, "      providesTags: [{{ type: '{}', id: 'LIST' }}],", tag)?;
    writeln!(out, "    }}),")?;

    writeln!(out, "    {}: builder.query({{", ep.get_by_id.name)?;
    writeln!(out, "      query: (id: string) => toSearch({{ id }}),")?;
    writeln!(out, "      providesTags: (_result, _error, id) => [{{ type: '{}', id }}],", tag)?;
    writeln!(out, "    }}),")?;

    writeln!(out, "    {}: builder.mutation({{", ep.add.name)?;
    writeln!(out, "      query: (body: {}) => ({{ url: '', method: 'POST', body }}),", naming.interface_name)?;
    writeln!(out, "      invalidatesTags: [{{ type: '{}', id: 'LIST' }}],", tag)?;
    writeln!(out, "    }}),")?;

    writeln!(out, "    {}: builder.mutation({{", ep.update.name)?;
    writeln!(
        out,
        "      query: ({{ id, ...data }}: Partial<{}> & {{ id: string }}) => ({{ url: '', method: 'PUT', body: {{ id, ...data }} }}),",
        naming.interface_name
    )?;
    writeln!(out, "      invalidatesTags: [{{ type: '{}', id: 'LIST' }}],", tag)?;
    writeln!(out, "    }}),")?;

    writeln!(out, "    {}: builder.mutation({{", ep.delete.name)?;
    writeln!(out, "      query: ({{ id }}: {{ id: string }}) => ({{ url: '', method: 'DELETE', body: {{ id }} }}),")?;
    writeln!(out, "      invalidatesTags: [{{ type: '{}', id: 'LIST' }}],", tag)?;
    writeln!(out, "    }}),")?;

    writeln!(out, "    {}: builder.mutation({{", ep.bulk_update.name)?;
    writeln!(
        out,
        "      query: (updates: {{ id: string; updateData: Partial<{}> }}[]) => ({{ url: '?bulk=true', method: 'PUT', body: updates }}),",
        naming.interface_name
    )?;
    writeln!(out, "      invalidatesTags: [{{ type: '{}', id: 'LIST' }}],", tag)?;
    writeln!(out, "    }}),")?;

    writeln!(out, "    {}: builder.mutation({{", ep.bulk_delete.name)?;
    writeln!(out, "      query: (ids: string[]) => ({{ url: '?bulk=true', method: 'DELETE', body: {{ ids }} }}),")?;
    writeln!(out, "      invalidatesTags: [{{ type: '{}', id: 'LIST' }}],", tag)?;
    writeln!(out, "    }}),")?;

    writeln!(out, "    {}: builder.query({{", ep.summary.name)?;
    writeln!(out, "      query: ({{ startDate, endDate }}: {{ startDate?: string; endDate?: string }}) =>")?;
    writeln!(out, "        toSearch({{ summary: 'true', startDate, endDate }}),")?;
    writeln!(out, "      providesTags: [{{ type: '{}', id: 'LIST' }}],", tag)?;
    writeln!(out, "    }}),")?;

    writeln!(out, "  }}),")?;
    writeln!(out, "}});")?;
    writeln!(out)?;
    writeln!(out, "export const {{")?;
    for endpoint in ep.all() {
        writeln!(out, "  {},", endpoint.hook)?;
    }
    writeln!(out, "}} = {};", naming.api_slice)?;

    Ok(out)
}

pub fn render_entity_data(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let mut out = String::new();

    writeln!(out, "// Auto-generated entity shape for {}", naming.plural_pascal)?;
    writeln!(out, "export interface {} {{", naming.interface_name)?;
    writeln!(out, "  _id?: string;")?;
    for field in ctx.fields() {
        writeln!(
            out,
            "  {}: {};",
            ts_property_key(field.name()),
            field.class.semantic_type().ts_type()
        )?;
    }
    writeln!(out, "  createdAt?: Date;")?;
    writeln!(out, "  updatedAt?: Date;")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "export const {} = (): {} => ({{", naming.default_const, naming.interface_name)?;
    for field in ctx.fields() {
        writeln!(
            out,
            "  {}: {},",
            ts_property_key(field.name()),
            field.class.default_value.ts_literal()
        )?;
    }
    writeln!(out, "}});")?;
    writeln!(out)?;

    writeln!(
        out,
        "export const {} = (item: Partial<{}>): string[] => {{",
        naming.validate_fn, naming.interface_name
    )?;
    writeln!(out, "  const errors: string[] = [];")?;
    for field in ctx.fields() {
        form::write_validation(&mut out, field, "item")?;
    }
    writeln!(out, "  return errors;")?;
    writeln!(out, "}};")?;

    Ok(out)
}

pub fn render_ui_store(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let iface = &naming.interface_name;
    let mut out = String::new();

    writeln!(out, "// Auto-generated UI store for {}", naming.plural_pascal)?;
    writeln!(out, "import {{ create }} from 'zustand';")?;
    writeln!(out, "import {{ {}, {} }} from './data/data';", iface, naming.default_const)?;
    writeln!(out)?;
    let modal_union: Vec<String> = MODALS.iter().map(|m| format!("'{}'", m)).collect();
    writeln!(out, "export type ModalName = {};", modal_union.join(" | "))?;
    writeln!(out)?;
    writeln!(out, "export interface DateRange {{")?;
    writeln!(out, "  start: string;")?;
    writeln!(out, "  end: string;")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "export interface {} {{", naming.store_interface)?;
    writeln!(out, "  queryPramsLimit: number;")?;
    writeln!(out, "  queryPramsPage: number;")?;
    writeln!(out, "  queryPramsQ: string;")?;
    writeln!(out, "  dateRange: DateRange;")?;
    writeln!(out, "  modals: Record<ModalName, boolean>;")?;
    writeln!(out, "  newItem: {};", iface)?;
    writeln!(out, "  selectedItem: {} | null;", iface)?;
    writeln!(out, "  bulkData: {}[];", iface)?;
    writeln!(out, "  setQueryPramsLimit: (limit: number) => void;")?;
    writeln!(out, "  setQueryPramsPage: (page: number) => void;")?;
    writeln!(out, "  setQueryPramsQ: (q: string) => void;")?;
    writeln!(out, "  setDateRange: (range: DateRange) => void;")?;
    writeln!(out, "  toggleModal: (name: ModalName, open: boolean) => void;")?;
    writeln!(out, "  setNewItem: (item: {}) => void;", iface)?;
    writeln!(out, "  resetNewItem: () => void;")?;
    writeln!(out, "  setSelectedItem: (item: {} | null) => void;", iface)?;
    writeln!(out, "  setBulkData: (items: {}[]) => void;", iface)?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "const closedModals = (): Record<ModalName, boolean> => ({{")?;
    for modal in MODALS {
        writeln!(out, "  {}: false,", modal)?;
    }
    writeln!(out, "}});")?;
    writeln!(out)?;
    writeln!(out, "export const {} = create<{}>((set) => ({{", naming.store_hook, naming.store_interface)?;
    writeln!(out, "  queryPramsLimit: 10,")?;
    writeln!(out, "  queryPramsPage: 1,")?;
    writeln!(out, "  queryPramsQ: '',")?;
    writeln!(out, "  dateRange: {{ start: '', end: '' }},")?;
    writeln!(out, "  modals: closedModals(),")?;
    writeln!(out, "  newItem: {}(),", naming.default_const)?;
    writeln!(out, "  selectedItem: null,")?;
    writeln!(out, "  bulkData: [],")?;
    writeln!(out, "  setQueryPramsLimit: (limit) => set({{ queryPramsLimit: limit, queryPramsPage: 1 }}),")?;
    writeln!(out, "  setQueryPramsPage: (page) => set({{ queryPramsPage: page }}),")?;
    writeln!(out, "  setQueryPramsQ: (q) => set({{ queryPramsQ: q, queryPramsPage: 1 }}),")?;
    writeln!(out, "  setDateRange: (range) => set({{ dateRange: range, queryPramsPage: 1 }}),")?;
    writeln!(out, "  toggleModal: (name, open) => set((state) => ({{ modals: {{ ...state.modals, [name]: open }} }})),")?;
    writeln!(out, "  setNewItem: (item) => set({{ newItem: item }}),")?;
    writeln!(out, "  resetNewItem: () => set({{ newItem: {}() }}),", naming.default_const)?;
    writeln!(out, "  setSelectedItem: (item) => set({{ selectedItem: item }}),")?;
    writeln!(out, "  setBulkData: (items) => set({{ bulkData: items }}),")?;
    writeln!(out, "}}));")?;

    Ok(out)
}

/// Components mounted by the list page, in render order
const PAGE_COMPONENTS: [&str; 12] = [
    "Add",
    "Edit",
    "View",
    "Delete",
    "BulkEdit",
    "BulkUpdate",
    "BulkDynamicUpdate",
    "BulkDelete",
    "FilterDialog",
    "Export",
    "Summary",
    "TableView",
];

pub fn render_page(ctx: &GenerationContext) -> Result<String, fmt::Error> {
    let naming = ctx.naming();
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    writeln!(out, "// Auto-generated list page for {}", naming.plural_pascal)?;
    writeln!(out, "import {{ useEffect, useState }} from 'react';")?;
    writeln!(out, "import {{ {} }} from './redux/rtk-api';", naming.endpoints.list.hook)?;
    writeln!(out, "import {{ {} }} from './store/store';", naming.store_hook)?;
    writeln!(out, "import {{ {} }} from './store/data/data';", naming.interface_name)?;
    for component in PAGE_COMPONENTS {
        writeln!(out, "import {} from './components/{}';", component, component)?;
    }
    writeln!(out)?;
    writeln!(out, "export default function {}Page() {{", naming.plural_pascal)?;
    writeln!(out, "  const {{")?;
    writeln!(out, "    queryPramsLimit,")?;
    writeln!(out, "    queryPramsPage,")?;
    writeln!(out, "    queryPramsQ,")?;
    writeln!(out, "    dateRange,")?;
    writeln!(out, "    bulkData,")?;
    writeln!(out, "    setQueryPramsLimit,")?;
    writeln!(out, "    setQueryPramsPage,")?;
    writeln!(out, "    setQueryPramsQ,")?;
    writeln!(out, "    toggleModal,")?;
    writeln!(out, "  }} = {}();", naming.store_hook)?;
    writeln!(out, "  const [search, setSearch] = useState(queryPramsQ);")?;
    writeln!(out)?;
    writeln!(out, "  useEffect(() => {{")?;
    writeln!(out, "    const timer = setTimeout(() => setQueryPramsQ(search), 300);")?;
    writeln!(out, "    return () => clearTimeout(timer);")?;
    writeln!(out, "  }}, [search, setQueryPramsQ]);")?;
    writeln!(out)?;
    writeln!(out, "  const {{ data, isLoading, isError }} = {}({{", naming.endpoints.list.hook)?;
    writeln!(out, "    page: queryPramsPage,")?;
    writeln!(out, "    limit: queryPramsLimit,")?;
    writeln!(out, "    q: queryPramsQ,")?;
    writeln!(out, "    startDate: dateRange.start,")?;
    writeln!(out, "    endDate: dateRange.end,")?;
    writeln!(out, "  }});")?;
    writeln!(out)?;
    writeln!(out, "  const items: {}[] = data?.data?.{} ?? [];", naming.interface_name, naming.plural_camel)?;
    writeln!(out, "  const total: number = data?.data?.total ?? 0;")?;
    writeln!(out, "  const totalPages = Math.max(Math.ceil(total / queryPramsLimit), 1);")?;
    writeln!(out, "  const hasSelection = bulkData.length > 0;")?;
    writeln!(out)?;
    writeln!(out, "  return (")?;
    writeln!(out, "    <main className=\"container mx-auto p-4\">")?;
    writeln!(out, "      <div className=\"mb-4 flex flex-wrap items-center justify-between gap-2\">")?;
    writeln!(out, "        <h1 className=\"text-2xl font-semibold\">{}</h1>", naming.plural_pascal)?;
    writeln!(out, "        <div className=\"flex flex-wrap gap-2\">")?;
    writeln!(out, "          <button className=\"{}\" onClick={{() => toggleModal('add', true)}}>Add {}</button>", BUTTON_CLASS, naming.singular_pascal)?;
    writeln!(out, "          <button className=\"{}\" onClick={{() => toggleModal('filter', true)}}>Filter</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "          <button className=\"{}\" onClick={{() => toggleModal('summary', true)}}>Summary</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "          <button className=\"{}\" onClick={{() => toggleModal('export', true)}}>Export</button>", SECONDARY_BUTTON_CLASS)?;
    for (modal, text) in [
        ("bulkEdit", "Bulk Edit"),
        ("bulkUpdate", "Bulk Update"),
        ("bulkDynamicUpdate", "Bulk Dynamic Update"),
        ("bulkDelete", "Bulk Delete"),
    ] {
        writeln!(
            out,
            "          <button className=\"{}\" disabled={{!hasSelection}} onClick={{() => toggleModal('{}', true)}}>{}</button>",
            SECONDARY_BUTTON_CLASS, modal, text
        )?;
    }
    writeln!(out, "        </div>")?;
    writeln!(out, "      </div>")?;
    writeln!(out)?;
    writeln!(out, "      <div className=\"mb-4 flex items-center gap-2\">")?;
    writeln!(
        out,
        "        <input className=\"{}\" placeholder=\"Search {}...\" value={{search}} onChange={{(e) => setSearch(e.target.value)}} />",
        INPUT_CLASS, naming.plural_lower
    )?;
    writeln!(out, "        <select className=\"rounded border border-gray-300 px-2 py-2 text-sm\" value={{queryPramsLimit}} onChange={{(e) => setQueryPramsLimit(Number(e.target.value))}}>")?;
    writeln!(out, "          {{[10, 25, 50, 100].map((n) => (")?;
    writeln!(out, "            <option key={{n}} value={{n}}>{{n}} / page</option>")?;
    writeln!(out, "          ))}}")?;
    writeln!(out, "        </select>")?;
    writeln!(out, "      </div>")?;
    writeln!(out)?;
    writeln!(out, "      {{isLoading && <p className=\"text-sm text-gray-500\">Loading...</p>}}")?;
    writeln!(out, "      {{isError && <p className=\"text-sm text-red-600\">Failed to load {}.</p>}}", naming.plural_lower)?;
    writeln!(out, "      {{!isLoading && !isError && <TableView items={{items}} />}}")?;
    writeln!(out)?;
    writeln!(out, "      <div className=\"mt-4 flex items-center justify-between text-sm\">")?;
    writeln!(out, "        <span>Total: {{total}}</span>")?;
    writeln!(out, "        <div className=\"flex items-center gap-2\">")?;
    writeln!(out, "          <button className=\"{}\" disabled={{queryPramsPage <= 1}} onClick={{() => setQueryPramsPage(queryPramsPage - 1)}}>Previous</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "          <span>Page {{queryPramsPage}} of {{totalPages}}</span>")?;
    writeln!(out, "          <button className=\"{}\" disabled={{queryPramsPage >= totalPages}} onClick={{() => setQueryPramsPage(queryPramsPage + 1)}}>Next</button>", SECONDARY_BUTTON_CLASS)?;
    writeln!(out, "        </div>")?;
    writeln!(out, "      </div>")?;
    writeln!(out)?;
    for component in PAGE_COMPONENTS.iter().filter(|c| **c != "TableView") {
        if *component == "Export" {
            writeln!(out, "      <Export items={{items}} />")?;
        } else {
            writeln!(out, "      <{} />", component)?;
        }
    }
    writeln!(out, "    </main>")?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::context::test_support::posts_context;

    #[test]
    fn test_slice_schema_is_the_payload() {
        let ctx = posts_context();
        let text = render_slice_schema(&ctx).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(&value, ctx.raw_schema());
    }

    #[test]
    fn test_query_slice() {
        let slice = render_query_slice(&posts_context()).unwrap();
        assert!(slice.contains("reducerPath: 'postsApi',"));
        assert!(slice.contains("baseQuery: fetchBaseQuery({ baseUrl: '/dashboard/posts/api/v1' }),"));
        assert!(slice.contains("tagTypes: ['tagTypePosts'],"));
        assert!(slice.contains("    bulkDeletePosts: builder.mutation({"));
        assert!(slice.contains("  useGetPostsSummaryQuery,\n} = postsApi;"));
    }

    #[test]
    fn test_entity_data() {
        let data = render_entity_data(&posts_context()).unwrap();
        assert!(data.contains("export interface IPosts {"));
        assert!(data.contains("  views: number;"));
        assert!(data.contains("  tags: string[];"));
        assert!(data.contains("  publishedAt: Date;"));
        assert!(data.contains("  views: 0,"));
        assert!(data.contains("  tags: [],"));
        assert!(data.contains("  publishedAt: new Date(),"));
        assert!(data.contains("  title: '',"));
        assert!(data.contains("export const validatePosts = (item: Partial<IPosts>): string[] => {"));
    }

    #[test]
    fn test_ui_store() {
        let store = render_ui_store(&posts_context()).unwrap();
        assert!(store.contains("export const usePostsStore = create<PostsStore>((set) => ({"));
        assert!(store.contains("  newItem: defaultPosts(),"));
        assert!(store.contains("  bulkDynamicUpdate: false,"));
    }

    #[test]
    fn test_page_wires_components() {
        let page = render_page(&posts_context()).unwrap();
        assert!(page.starts_with("'use client';"));
        assert!(page.contains("import { useGetPostsQuery } from './redux/rtk-api';"));
        assert!(page.contains("import BulkDynamicUpdate from './components/BulkDynamicUpdate';"));
        assert!(page.contains("const items: IPosts[] = data?.data?.posts ?? [];"));
        assert!(page.contains("<TableView items={items} />"));
        assert!(page.contains("<Export items={items} />"));
    }
}
