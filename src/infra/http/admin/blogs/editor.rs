use crate::application::admin::blogs::BlogEditor;
use crate::domain::entities::CategoryRecord;
use crate::presentation::admin::views as admin_views;

pub(super) fn build_new_blog_view(categories: &[CategoryRecord]) -> admin_views::AdminBlogFormView {
    admin_views::AdminBlogFormView {
        heading: "Create Blog".to_string(),
        form_action: "/admin/insert".to_string(),
        submit_label: "Create Blog".to_string(),
        slug: None,
        title: String::new(),
        subtitle: String::new(),
        description: String::new(),
        attachment: String::new(),
        is_popular: false,
        category_field: "categories".to_string(),
        options: categories
            .iter()
            .map(|category| option_view(category, false))
            .collect(),
        current_categories: Vec::new(),
    }
}

pub(super) fn build_blog_edit_view(editor: &BlogEditor) -> admin_views::AdminBlogFormView {
    let blog = &editor.blog.blog;
    admin_views::AdminBlogFormView {
        heading: format!("Edit Blog: {}", blog.title),
        form_action: format!("/admin/edit/{}", blog.slug),
        submit_label: "Save Changes".to_string(),
        slug: Some(blog.slug.clone()),
        title: blog.title.clone(),
        subtitle: blog.subtitle.clone(),
        description: blog.description.clone(),
        attachment: blog.attachment.clone(),
        is_popular: blog.is_popular,
        category_field: "cates".to_string(),
        options: editor
            .options
            .iter()
            .map(|option| option_view(&option.category, option.selected))
            .collect(),
        current_categories: editor
            .blog
            .categories
            .iter()
            .map(|category| category.name.clone())
            .collect(),
    }
}

fn option_view(category: &CategoryRecord, selected: bool) -> admin_views::AdminCategoryOptionView {
    admin_views::AdminCategoryOptionView {
        slug: category.slug.clone(),
        name: category.name.clone(),
        selected,
    }
}
