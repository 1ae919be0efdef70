use futures::FutureExt;
use std::rc::Rc;

use crate::{
    api::{ApiClient, ExceptionRule, ExceptionRulePayload},
    state::crud::CrudOps,
};

pub fn crud_ops(api: ApiClient) -> CrudOps<ExceptionRule, ExceptionRulePayload> {
    let fetch_api = api.clone();
    let add_api = api.clone();
    let edit_api = api.clone();
    CrudOps {
        fetch: Rc::new(move || {
            let api = fetch_api.clone();
            async move { api.list_exception_rules().await }.boxed_local()
        }),
        add: Rc::new(move |payload| {
            let api = add_api.clone();
            async move { api.create_exception_rule(&payload).await.map(|_| ()) }.boxed_local()
        }),
        edit: Rc::new(move |id, payload| {
            let api = edit_api.clone();
            async move { api.update_exception_rule(id, &payload).await.map(|_| ()) }.boxed_local()
        }),
        delete: Rc::new(move |id| {
            let api = api.clone();
            async move { api.delete_exception_rule(id).await }.boxed_local()
        }),
    }
}
