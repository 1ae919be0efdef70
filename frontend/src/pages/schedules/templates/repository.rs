use futures::FutureExt;
use std::rc::Rc;

use crate::{
    api::{ApiClient, ShiftTemplate, ShiftTemplatePayload},
    state::crud::CrudOps,
};

pub fn crud_ops(api: ApiClient) -> CrudOps<ShiftTemplate, ShiftTemplatePayload> {
    let fetch_api = api.clone();
    let add_api = api.clone();
    let edit_api = api.clone();
    CrudOps {
        fetch: Rc::new(move || {
            let api = fetch_api.clone();
            async move { api.list_shift_templates().await }.boxed_local()
        }),
        add: Rc::new(move |payload| {
            let api = add_api.clone();
            async move { api.create_shift_template(&payload).await.map(|_| ()) }.boxed_local()
        }),
        edit: Rc::new(move |id, payload| {
            let api = edit_api.clone();
            async move { api.update_shift_template(id, &payload).await.map(|_| ()) }.boxed_local()
        }),
        delete: Rc::new(move |id| {
            let api = api.clone();
            async move { api.delete_shift_template(id).await }.boxed_local()
        }),
    }
}
